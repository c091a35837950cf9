use serde_json::json;
use ssv::condition::{ConditionInput, ConditionKind, ConditionOrigin};
use ssv::element::{ElementKind, ElementOptions};
use ssv::extensions::{PopoverInput, PopoverKind};
use ssv::{ErrorCategory, VisConfig, VisError, Visualization};

const IMAGE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <rect id="tank" x="0" y="0" width="10" height="10"/>
  <path id="wall" d="M0 0 L10 10"/>
  <rect id="core"/>
  <circle id="alarm" r="2"/>
  <text id="summary">-</text>
</svg>"#;

fn vis() -> Visualization {
    Visualization::from_markup(&json!([0, 1, 2]), "s", IMAGE, VisConfig::default())
        .expect("visualization")
}

fn info(data: serde_json::Value) -> ConditionInput {
    ConditionInput::new().with_data(data)
}

#[test]
fn cell_keeps_conditions_in_call_order() {
    let mut vis = vis();
    let cell = vis
        .add_element("cell", "tank", "Tank", &ElementOptions::default())
        .expect("cell");
    cell.add_condition("info", &info(json!([1, 2, 3]))).expect("info");
    cell.add_condition(
        "background",
        &info(json!([1, 2, 3])).with_color_scale(json!(["#fff", "#000"]), json!([0, 3])),
    )
    .expect("background");
    cell.add_condition(
        "logical",
        &info(json!([0, 1, 0])).with_logical_colors("#0f0", "#f00"),
    )
    .expect("logical");

    let kinds: Vec<ConditionKind> = cell.conditions().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        [ConditionKind::Info, ConditionKind::Background, ConditionKind::Logical]
    );
    let ids: Vec<&str> = cell.conditions().iter().map(|c| c.id()).collect();
    assert_eq!(ids, ["tank_0", "tank_1", "tank_2"]);
}

#[test]
fn capped_kind_inserts_before_the_last_slot_once_exceeded() {
    let mut vis = vis();
    let toggle = vis
        .add_element("toggle", "alarm", "Alarm", &ElementOptions::default())
        .expect("toggle");
    toggle.add_condition("info", &info(json!([0, 0, 0])).with_description("c0")).expect("c0");
    toggle.add_condition("show_hide", &info(json!([1, 1, 1])).with_description("c1")).expect("c1");
    toggle.add_condition("info", &info(json!([2, 2, 2])).with_description("c2")).expect("c2");

    let order: Vec<&str> = toggle.conditions().iter().map(|c| c.description()).collect();
    assert_eq!(order, ["c0", "c2", "c1"]);
}

#[test]
fn disallowed_condition_kind_is_rejected_without_mutation() {
    let mut vis = vis();
    let line = vis
        .add_element("line", "wall", "Wall", &ElementOptions::default())
        .expect("line");
    let err = line
        .add_condition("background", &info(json!([1, 2, 3])))
        .expect_err("not allowed on lines");
    assert!(matches!(err, VisError::ConditionNotAllowed { element: "line", .. }));
    assert_eq!(err.category(), ErrorCategory::UnsupportedKind);
    assert!(line.conditions().is_empty());
}

#[test]
fn dynamic_level_appends_companion_info_after_parent() {
    let mut vis = vis();
    let cell = vis
        .add_element("cell", "tank", "Tank", &ElementOptions::default())
        .expect("cell");
    cell.add_condition("info", &info(json!([9, 9, 9]))).expect("info");
    cell.add_condition(
        "dynamic_level",
        &info(json!([1, 2, 1]))
            .with_color_data(json!([3, 4, 5]))
            .with_color_scale(json!(["#fff", "#888", "#000"]), json!([3, 4, 5]))
            .with_heights(0, 5)
            .with_color_data_label("Water Temp", "K"),
    )
    .expect("dynamic level");

    let conditions = cell.conditions();
    assert_eq!(conditions.len(), 3);
    assert_eq!(conditions[1].kind(), ConditionKind::DynamicLevel);
    let companion = &conditions[2];
    assert_eq!(companion.kind(), ConditionKind::Info);
    assert_eq!(companion.origin(), ConditionOrigin::Companion);
    assert_eq!(companion.description(), "Water Temp");
    assert_eq!(companion.common().unit, "K");
    assert_eq!(companion.id(), "tank_2");
    let data = companion.payload().data().expect("companion data");
    assert_eq!(data.values(), &[3.0, 4.0, 5.0]);
}

#[test]
fn table_attaches_its_condition_and_locks() {
    let mut vis = vis();
    let table = vis
        .add_element(
            "table",
            "summary",
            "Summary",
            &ElementOptions::new().with_table(
                json!([[["a", 1]], [["b", 2]], [["c", 3]]]),
                json!(["name", "value"]),
            ),
        )
        .expect("table");
    assert_eq!(table.kind(), ElementKind::Table);
    assert_eq!(table.ids(), &[String::new()]);
    assert_eq!(table.report_id(), "summary");
    assert_eq!(table.conditions().len(), 1);
    assert_eq!(table.conditions()[0].kind(), ConditionKind::TabularInfo);

    let err = table
        .add_condition("tabular_info", &ConditionInput::new())
        .expect_err("locked");
    assert!(matches!(err, VisError::ConditionsLocked { element: "table" }));
    assert_eq!(table.conditions().len(), 1);
}

#[test]
fn legend_requires_a_valid_color_scale_at_construction() {
    let mut vis = vis();
    let err = vis
        .add_element(
            "legend",
            "core",
            "Temperature",
            &ElementOptions::new().with_color_scale(json!(["#fff", "#00"]), json!([0, 1])),
        )
        .expect_err("bad hex");
    assert_eq!(err.category(), ErrorCategory::ColorFormat);
    assert_eq!(vis.reserved_ids().count(), 0);

    let legend = vis
        .add_element(
            "legend",
            "core",
            "Temperature",
            &ElementOptions::new().with_color_scale(json!(["#fff", "#000"]), json!([0, 1])),
        )
        .expect("legend");
    assert_eq!(legend.conditions()[0].kind(), ConditionKind::ColorScale);
}

#[test]
fn remove_condition_reports_out_of_range_indices() {
    let mut vis = vis();
    let cell = vis
        .add_element("cell", "tank", "", &ElementOptions::default())
        .expect("cell");
    cell.add_condition("info", &info(json!([1, 2, 3]))).expect("info");
    assert!(cell.condition(0).is_some());
    let removed = cell.remove_condition(0).expect("remove");
    assert_eq!(removed.kind(), ConditionKind::Info);
    assert_eq!(
        cell.remove_condition(0).expect_err("empty").category(),
        ErrorCategory::NotFound
    );
}

#[test]
fn popover_is_validated_against_time_axis_and_replaced() {
    let mut vis = vis();
    let cell = vis
        .add_element("cell", "tank", "", &ElementOptions::default())
        .expect("cell");

    let err = cell
        .add_popover("line_chart", &PopoverInput::new(json!([1, 2])))
        .expect_err("short series");
    assert_eq!(err.category(), ErrorCategory::Shape);
    assert!(cell.popover().is_none());

    cell.add_popover("LineChart", &PopoverInput::new(json!([1, 2, 3])))
        .expect("first popover");
    cell.add_popover(
        "linechart",
        &PopoverInput::new(json!([3, 2, 1])).with_dims(0.4, 0.3).with_label("Trend"),
    )
    .expect("second popover");
    let popover = cell.popover().expect("popover");
    assert_eq!(popover.kind(), PopoverKind::LineChart);
    assert_eq!(popover.dims(), [0.4, 0.3]);
    assert_eq!(popover.label(), "Trend");

    assert_eq!(
        cell.add_popover("gauge", &PopoverInput::new(json!([1, 2, 3])))
            .expect_err("unknown")
            .category(),
        ErrorCategory::UnsupportedKind
    );
}

#[test]
fn condition_ids_stay_unique_after_removal() {
    let mut vis = vis();
    let cell = vis
        .add_element("cell", "tank", "", &ElementOptions::default())
        .expect("cell");
    cell.add_condition("info", &info(json!([1, 2, 3]))).expect("first");
    cell.add_condition("info", &info(json!([4, 5, 6]))).expect("second");
    cell.remove_condition(0).expect("remove first");
    cell.add_condition("info", &info(json!([7, 8, 9]))).expect("third");

    let ids: Vec<&str> = cell.conditions().iter().map(|c| c.id()).collect();
    assert_eq!(ids, ["tank_1", "tank_2"]);
}
