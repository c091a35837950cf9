use quick_xml::escape::{escape, partial_escape};

use super::{ImageDocument, NodeData, NodeId};

impl ImageDocument {
    /// Serializes the tree under the root, without an XML declaration.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match self.data(node) {
            NodeData::Element { name, attributes } => {
                out.push('<');
                out.push_str(name);
                for attribute in attributes {
                    out.push(' ');
                    out.push_str(&attribute.name);
                    out.push_str("=\"");
                    out.push_str(&escape(attribute.value.as_str()));
                    out.push('"');
                }
                let children = self.children(node);
                if children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in children {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            NodeData::Text(text) => out.push_str(&partial_escape(text.as_str())),
            NodeData::CData(data) => {
                out.push_str(&format!("<![CDATA[{data}]]>"));
            }
            NodeData::Comment(comment) => {
                out.push_str(&format!("<!--{comment}-->"));
            }
        }
    }
}
