use super::{ImageDocument, NodeId};

/// Node kinds data can be bound to; groups are structural only.
pub const DRAWABLE_TAGS: [&str; 4] = ["path", "circle", "rect", "ellipse"];

pub const ROOT_ID: &str = "ssv-svg";
pub const ZOOM_CONTAINER_ID: &str = "zoom-container";
pub const OVERLAY_ID: &str = "ssv-overlay";

fn is_kept_root_attribute(name: &str) -> bool {
    name == "viewBox" || name == "xmlns" || name.starts_with("xmlns:")
}

impl ImageDocument {
    #[must_use]
    pub fn has_view_box(&self) -> bool {
        self.attribute(self.root, "viewBox").is_some()
    }

    /// Drops every root attribute except `viewBox` and namespace declarations.
    pub(crate) fn strip_root_attributes(&mut self) {
        self.retain_root_attributes(is_kept_root_attribute);
    }

    fn is_drawable(&self, node: NodeId) -> bool {
        self.local_name(node)
            .is_some_and(|name| DRAWABLE_TAGS.contains(&name))
    }

    fn is_group(&self, node: NodeId) -> bool {
        self.local_name(node) == Some("g")
    }

    /// Moves top-level drawables and groups into the zoom container and adds
    /// the overlay placeholder. Runs at most once per document.
    pub fn prepare_layers(&mut self) {
        if self.annotated {
            return;
        }
        self.annotated = true;

        let root = self.root;
        self.set_attribute(root, "id", ROOT_ID);

        let has_defs = self
            .element_children(root)
            .any(|child| self.local_name(child) == Some("defs"));
        if !has_defs {
            let defs = self.create_element("defs", &[]);
            self.insert_child(root, 0, defs);
        }

        let layered: Vec<NodeId> = self
            .element_children(root)
            .filter(|child| self.is_drawable(*child) || self.is_group(*child))
            .collect();
        let zoom = self.create_element("g", &[("id", ZOOM_CONTAINER_ID)]);
        for node in layered {
            self.append_child(zoom, node);
        }
        self.append_child(root, zoom);

        let overlay = self.create_element("rect", &[("id", OVERLAY_ID)]);
        self.append_child(root, overlay);
    }

    /// Binds `id` to image nodes and returns how many drawables carry it.
    ///
    /// A matching drawable with element siblings is wrapped in its own group.
    /// A matching group loses the id, which is stamped onto every drawable
    /// inside it instead.
    pub fn bind_id(&mut self, id: &str) -> usize {
        let matches = self.find_by_id(id);

        let drawables: Vec<NodeId> = matches
            .iter()
            .copied()
            .filter(|node| self.is_drawable(*node))
            .collect();
        for &node in &drawables {
            let crowded = self
                .parent(node)
                .is_some_and(|parent| self.element_children(parent).count() > 1);
            if crowded {
                self.wrap_in_group(node);
            }
        }

        let mut bound = drawables.len();
        let groups: Vec<NodeId> = matches
            .into_iter()
            .filter(|node| self.is_group(*node))
            .collect();
        for group in groups {
            self.remove_attribute(group, "id");
            bound += self.stamp_id(group, id);
        }
        bound
    }

    fn stamp_id(&mut self, group: NodeId, id: &str) -> usize {
        let children: Vec<NodeId> = self.element_children(group).collect();
        let mut stamped = 0;
        for child in children {
            if self.is_group(child) {
                stamped += self.stamp_id(child, id);
            } else if self.is_drawable(child) {
                self.set_attribute(child, "id", id);
                stamped += 1;
            }
        }
        stamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> ImageDocument {
        let markup = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="10">{body}</svg>"#
        );
        let mut doc = ImageDocument::parse(&markup).expect("parse");
        doc.strip_root_attributes();
        doc
    }

    #[test]
    fn layers_are_inserted_once() {
        let mut image = doc(r#"<rect id="a"/><text>t</text>"#);
        image.prepare_layers();
        image.prepare_layers();
        assert_eq!(
            image.to_markup(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" id="ssv-svg">"#,
                r#"<defs/><text>t</text><g id="zoom-container"><rect id="a"/></g>"#,
                r#"<rect id="ssv-overlay"/></svg>"#
            )
        );
    }

    #[test]
    fn group_ids_move_to_nested_drawables() {
        let mut image = doc(r#"<g id="pipe"><path/><g><circle/></g><text/></g>"#);
        image.prepare_layers();
        assert_eq!(image.bind_id("pipe"), 2);
        let carriers: Vec<Option<&str>> = image
            .find_by_id("pipe")
            .into_iter()
            .map(|node| image.local_name(node))
            .collect();
        assert_eq!(carriers, [Some("path"), Some("circle")]);
    }

    #[test]
    fn unknown_ids_bind_nothing() {
        let mut image = doc(r#"<rect id="a"/>"#);
        image.prepare_layers();
        assert_eq!(image.bind_id("missing"), 0);
    }
}
