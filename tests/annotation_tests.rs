use serde_json::json;
use ssv::element::ElementOptions;
use ssv::image::{ImageDocument, OVERLAY_ID, ROOT_ID, ZOOM_CONTAINER_ID};
use ssv::{RenderMode, VisConfig, Visualization};

const LAYOUT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" height="100">
<defs><linearGradient id="grad"/></defs>
<g id="vessel"><path d="M0 0"/><g><ellipse/></g></g>
<g id="pipes"><rect id="pipe_a"/><rect id="pipe_b"/></g>
<circle id="pump"/>
<text id="legend_box">legend</text>
</svg>"#;

fn annotated(ids: &[&str]) -> ImageDocument {
    let mut vis = Visualization::from_markup(&json!([0, 1]), "s", LAYOUT, VisConfig::default())
        .expect("visualization");
    for id in ids {
        vis.add_element("cell", *id, "", &ElementOptions::default())
            .expect("cell");
    }
    let output = vis.render(RenderMode::Full).expect("render");
    ImageDocument::parse(&output.payload.sim_visual).expect("annotated markup parses")
}

#[test]
fn synthetic_layers_wrap_top_level_drawables() {
    let doc = annotated(&[]);
    let root = doc.root();
    assert_eq!(doc.attribute(root, "id"), Some(ROOT_ID));
    assert_eq!(doc.attribute(root, "height"), None);

    let top: Vec<&str> = doc
        .element_children(root)
        .filter_map(|node| doc.local_name(node))
        .collect();
    assert_eq!(top, ["defs", "text", "g", "rect"]);

    let zoom = doc.find_by_id(ZOOM_CONTAINER_ID)[0];
    let layered: Vec<&str> = doc
        .element_children(zoom)
        .filter_map(|node| doc.local_name(node))
        .collect();
    assert_eq!(layered, ["g", "g", "circle"]);
    assert_eq!(doc.find_by_id(OVERLAY_ID).len(), 1);
}

#[test]
fn drawables_with_siblings_get_their_own_group() {
    let doc = annotated(&["pipe_a"]);
    let pipe = doc.find_by_id("pipe_a")[0];
    let wrapper = doc.parent(pipe).expect("wrapper");
    assert_eq!(doc.local_name(wrapper), Some("g"));
    assert_eq!(doc.attribute(wrapper, "id"), None);
    assert_eq!(doc.element_children(wrapper).count(), 1);

    let pipes = doc.parent(wrapper).expect("pipes group");
    assert_eq!(doc.attribute(pipes, "id"), Some("pipes"));
}

#[test]
fn only_children_are_not_wrapped() {
    let mut doc = ImageDocument::parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g><circle id="solo"/></g></svg>"#,
    )
    .expect("parse");
    doc.prepare_layers();
    assert_eq!(doc.bind_id("solo"), 1);
    let solo = doc.find_by_id("solo")[0];
    let parent = doc.parent(solo).expect("parent");
    assert_eq!(doc.element_children(parent).count(), 1);
    assert_eq!(doc.parent(parent), doc.find_by_id(ZOOM_CONTAINER_ID).first().copied());
}

#[test]
fn group_ids_are_stamped_onto_nested_drawables() {
    let doc = annotated(&["vessel"]);
    let carriers: Vec<&str> = doc
        .find_by_id("vessel")
        .into_iter()
        .filter_map(|node| doc.local_name(node))
        .collect();
    assert_eq!(carriers, ["path", "ellipse"]);
}

#[test]
fn text_nodes_are_not_binding_targets() {
    let mut vis = Visualization::from_markup(&json!([0, 1]), "s", LAYOUT, VisConfig::default())
        .expect("visualization");
    vis.add_element("cell", "legend_box", "", &ElementOptions::default())
        .expect("cell");
    let output = vis.render(RenderMode::Full).expect("render");
    assert!(output.payload.element_data["cell"].is_empty());
    assert_eq!(output.diagnostics.len(), 1);
}

#[test]
fn pristine_image_is_left_untouched_by_rendering() {
    let mut vis = Visualization::from_markup(&json!([0, 1]), "s", LAYOUT, VisConfig::default())
        .expect("visualization");
    vis.add_element("cell", "pump", "", &ElementOptions::default())
        .expect("cell");
    let before = vis.image().to_markup();
    vis.render(RenderMode::Full).expect("render");
    assert_eq!(vis.image().to_markup(), before);
    assert!(!vis.image().is_annotated());
}
