//! Arena-backed vector image tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. Moving a
//! node only rewires parent and child indices; detached nodes stay in the
//! arena and are simply unreachable from the root.

mod annotate;
mod parse;
mod writer;

pub use annotate::{DRAWABLE_TAGS, OVERLAY_ID, ROOT_ID, ZOOM_CONTAINER_ID};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element {
        name: String,
        attributes: Vec<Attribute>,
    },
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDocument {
    nodes: Vec<Node>,
    root: NodeId,
    /// Namespace prefix of the root tag (`svg` in `<svg:svg>`), reused for
    /// inserted nodes.
    prefix: Option<String>,
    annotated: bool,
}

impl ImageDocument {
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.annotated
    }

    #[must_use]
    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0].data
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Element children only; text and comments are skipped.
    pub fn element_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(|child| matches!(self.data(*child), NodeData::Element { .. }))
    }

    /// Tag name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self, node: NodeId) -> Option<&str> {
        match self.data(node) {
            NodeData::Element { name, .. } => {
                Some(name.rsplit_once(':').map_or(name.as_str(), |(_, local)| local))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.data(node) {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|attribute| attribute.name == name)
                .map(|attribute| attribute.value.as_str()),
            _ => None,
        }
    }

    /// Every node below `node` in document order, `node` excluded.
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Elements reachable from the root whose `id` attribute equals `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|node| self.attribute(*node, "id") == Some(id))
            .collect()
    }

    pub(crate) fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[node.0].data {
            match attributes.iter_mut().find(|attribute| attribute.name == name) {
                Some(existing) => value.clone_into(&mut existing.value),
                None => attributes.push(Attribute {
                    name: name.to_owned(),
                    value: value.to_owned(),
                }),
            }
        }
    }

    pub(crate) fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[node.0].data {
            attributes.retain(|attribute| attribute.name != name);
        }
    }

    pub(crate) fn retain_root_attributes(&mut self, keep: impl Fn(&str) -> bool) {
        let root = self.root;
        if let NodeData::Element { attributes, .. } = &mut self.nodes[root.0].data {
            attributes.retain(|attribute| keep(&attribute.name));
        }
    }

    fn qualified(&self, local: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{local}"),
            None => local.to_owned(),
        }
    }

    fn push_node(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Creates a detached element in the root's namespace.
    pub(crate) fn create_element(&mut self, local: &str, attributes: &[(&str, &str)]) -> NodeId {
        let data = NodeData::Element {
            name: self.qualified(local),
            attributes: attributes
                .iter()
                .map(|(name, value)| Attribute {
                    name: (*name).to_owned(),
                    value: (*value).to_owned(),
                })
                .collect(),
        };
        self.push_node(data, None)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    pub(crate) fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let end = self.children(parent).len();
        self.insert_child(parent, end, child);
    }

    /// Puts a new group where `node` was and moves `node` into it.
    pub(crate) fn wrap_in_group(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let index = self.children(parent).iter().position(|child| *child == node)?;
        let group = self.create_element("g", &[]);
        self.insert_child(parent, index, group);
        self.append_child(group, node);
        Some(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="a"><rect id="r"/><circle/></g></svg>"#;

    #[test]
    fn wrapping_keeps_sibling_position() {
        let mut doc = ImageDocument::parse(MARKUP).expect("parse");
        let rect = doc.find_by_id("r")[0];
        let group = doc.wrap_in_group(rect).expect("wrap");
        let outer = doc.find_by_id("a")[0];
        assert_eq!(doc.element_children(outer).next(), Some(group));
        assert_eq!(doc.parent(rect), Some(group));
        assert_eq!(doc.to_markup(), concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg">"#,
            r#"<g id="a"><g><rect id="r"/></g><circle/></g></svg>"#
        ));
    }

    #[test]
    fn descendants_are_in_document_order() {
        let doc = ImageDocument::parse(MARKUP).expect("parse");
        let names: Vec<&str> = doc
            .descendants(doc.root())
            .into_iter()
            .filter_map(|node| doc.local_name(node))
            .collect();
        assert_eq!(names, ["g", "rect", "circle"]);
    }
}
