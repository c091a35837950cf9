use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Attribute, ImageDocument, NodeData, NodeId, SVG_NAMESPACE};
use crate::error::{VisError, VisResult};

fn parse_error(err: impl std::fmt::Display) -> VisError {
    VisError::DocumentParse(err.to_string())
}

fn utf8(bytes: &[u8]) -> VisResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(parse_error)
}

fn element_data(start: &BytesStart<'_>) -> VisResult<NodeData> {
    let name = utf8(start.name().as_ref())?;
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(parse_error)?;
        attributes.push(Attribute {
            name: utf8(attribute.key.as_ref())?,
            value: attribute.unescape_value().map_err(parse_error)?.into_owned(),
        });
    }
    Ok(NodeData::Element { name, attributes })
}

impl ImageDocument {
    /// Parses SVG markup. The root must be an `svg` element in the SVG
    /// namespace, either as the default namespace or through a prefix.
    pub fn parse(markup: &str) -> VisResult<Self> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(false);

        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            prefix: None,
            annotated: false,
        };
        let mut open: Vec<NodeId> = Vec::new();
        let mut root_closed = false;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let position = reader.buffer_position();
                    return Err(parse_error(format!("{err} at byte {position}")));
                }
            };
            match event {
                Event::Start(start) | Event::Empty(start) if root_closed => {
                    return Err(parse_error(format!(
                        "unexpected element `{}` after the root element",
                        String::from_utf8_lossy(start.name().as_ref())
                    )));
                }
                Event::Start(start) => {
                    let node = doc.push_node(element_data(&start)?, open.last().copied());
                    open.push(node);
                }
                Event::Empty(start) => {
                    doc.push_node(element_data(&start)?, open.last().copied());
                    if open.is_empty() {
                        root_closed = true;
                    }
                }
                Event::End(_) => {
                    open.pop();
                    if open.is_empty() {
                        root_closed = true;
                    }
                }
                Event::Text(text) => {
                    let Some(&parent) = open.last() else {
                        continue;
                    };
                    let text = text.unescape().map_err(parse_error)?.into_owned();
                    doc.push_node(NodeData::Text(text), Some(parent));
                }
                Event::CData(data) => {
                    if let Some(&parent) = open.last() {
                        let data = utf8(&data.into_inner())?;
                        doc.push_node(NodeData::CData(data), Some(parent));
                    }
                }
                Event::Comment(comment) => {
                    if let Some(&parent) = open.last() {
                        let comment = utf8(&comment.into_inner())?;
                        doc.push_node(NodeData::Comment(comment), Some(parent));
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if !open.is_empty() {
            return Err(parse_error("unexpected end of document: unclosed elements"));
        }
        if doc.nodes.is_empty() {
            return Err(parse_error("document has no root element"));
        }
        doc.check_root()?;
        Ok(doc)
    }

    fn check_root(&mut self) -> VisResult<()> {
        let NodeData::Element { name, .. } = self.data(self.root) else {
            return Err(parse_error("document has no root element"));
        };
        let (prefix, local) = match name.split_once(':') {
            Some((prefix, local)) => (Some(prefix.to_owned()), local),
            None => (None, name.as_str()),
        };
        let namespace_attr = prefix
            .as_ref()
            .map_or_else(|| "xmlns".to_owned(), |prefix| format!("xmlns:{prefix}"));
        let in_svg_namespace = self.attribute(self.root, &namespace_attr) == Some(SVG_NAMESPACE);
        if local != "svg" || !in_svg_namespace {
            return Err(parse_error(format!(
                "root element must be an svg in the `{SVG_NAMESPACE}` namespace, found `{name}`"
            )));
        }
        self.prefix = prefix;
        Ok(())
    }
}
