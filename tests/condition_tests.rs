use serde_json::json;
use ssv::condition::{Condition, ConditionInput, ConditionKind, ConditionPayload};
use ssv::{ErrorCategory, VisError};

fn scale(input: ConditionInput) -> ConditionInput {
    input.with_color_scale(json!(["#ffffb2", "#fd8d3c", "#bd0026"]), json!([0, 2, 4]))
}

#[test]
fn factory_resolves_kind_names_case_insensitively() {
    let input = ConditionInput::new().with_data(json!([1, 2, 3]));
    for name in ["info", "Info", "INFO"] {
        let built = Condition::create(name, 3, &input).expect("info");
        assert_eq!(built.condition.kind(), ConditionKind::Info);
    }

    let err = Condition::create("sparkline", 3, &input).expect_err("unknown kind");
    assert_eq!(err.category(), ErrorCategory::UnsupportedKind);
}

#[test]
fn missing_required_field_names_field_and_kind() {
    let input = ConditionInput::new().with_data(json!([1, 2, 3]));
    let err = Condition::create("background", 3, &input).expect_err("no color scale");
    assert!(matches!(
        err,
        VisError::MissingField {
            field: "color_scale",
            kind: "background"
        }
    ));
}

#[test]
fn data_must_match_time_axis_length() {
    let input = scale(ConditionInput::new().with_data(json!([1, 2, 3, 4])));
    let err = Condition::create("background", 5, &input).expect_err("short series");
    assert_eq!(err.category(), ErrorCategory::Shape);
}

#[test]
fn static_level_validates_bounds_and_color() {
    let base = ConditionInput::new()
        .with_data(json!([0.5, 1.0]))
        .with_color("#0000ff");

    let built = Condition::create("static_level", 2, &base.clone().with_heights(0, 10))
        .expect("static level");
    let ConditionPayload::StaticLevel(level) = built.condition.payload() else {
        panic!("expected static level payload");
    };
    assert_eq!(level.color, "#0000ff");
    assert_eq!((level.min_height, level.max_height), (0.0, 10.0));

    let err = Condition::create("static_level", 2, &base.with_heights(10, 0))
        .expect_err("inverted bounds");
    assert_eq!(err.category(), ErrorCategory::Range);
}

#[test]
fn logical_requires_two_hex_colors() {
    let input = ConditionInput::new()
        .with_data(json!([0, 1, 1]))
        .with_logical_colors("#00ff00", "#ff0000");
    let built = Condition::create("logical", 3, &input).expect("logical");
    assert_eq!(built.condition.kind(), ConditionKind::Logical);

    let bad = ConditionInput::new()
        .with_data(json!([0, 1, 1]))
        .with_logical_colors("green", "#ff0000");
    assert_eq!(
        Condition::create("logical", 3, &bad).expect_err("named color").category(),
        ErrorCategory::ColorFormat
    );
}

#[test]
fn zonal_level_and_color_series_need_equal_zone_counts() {
    let base = scale(ConditionInput::new())
        .with_data(json!([[1, 2], [2, 3], [3, 4]]))
        .with_heights(0, 5);

    let matching = base.clone().with_color_data(json!([[0, 1], [1, 2], [2, 3]]));
    let built = Condition::create("ZonalY", 3, &matching).expect("zonal");
    assert_eq!(built.condition.kind(), ConditionKind::ZonalY);

    let mismatched = base.with_color_data(json!([[0, 1, 2], [1, 2, 3], [2, 3, 4]]));
    let err = Condition::create("zonal_y", 3, &mismatched).expect_err("zone count");
    assert_eq!(err.category(), ErrorCategory::LengthMismatch);
}

#[test]
fn equal_y_and_rect_check_dimensionality() {
    let equal = scale(ConditionInput::new()).with_data(json!([[1, 2, 3], [2, 3, 4]]));
    assert!(Condition::create("equal_y", 2, &equal).is_ok());

    let flat = scale(ConditionInput::new()).with_data(json!([1, 2]));
    assert_eq!(
        Condition::create("equal_y", 2, &flat).expect_err("1-d").category(),
        ErrorCategory::Shape
    );

    let rect = scale(ConditionInput::new()).with_data(json!([[[1, 2], [3, 4]], [[2, 3], [4, 5]]]));
    let built = Condition::create("rect", 2, &rect).expect("rect");
    let data = built.condition.payload().data().expect("rect data");
    assert_eq!(data.shape(), &[2, 2, 2]);
}

#[test]
fn tabular_info_takes_one_string_table_per_step() {
    let input = ConditionInput::new().with_table(
        json!([[["pump", 1]], [["pump", 2], ["valve", "open"]]]),
        json!(["component", "state"]),
    );
    let built = Condition::create("tabular_info", 2, &input).expect("table");
    let ConditionPayload::TabularInfo(table) = built.condition.payload() else {
        panic!("expected tabular payload");
    };
    assert_eq!(table.data[1].values()[3], "open");
    assert_eq!(table.data[0].values()[1], "1");
    assert_eq!(table.headers, ["component", "state"]);

    let short = ConditionInput::new().with_table(json!([[["a"]]]), json!(["h"]));
    assert_eq!(
        Condition::create("tabular_info", 2, &short).expect_err("one slice").category(),
        ErrorCategory::Shape
    );
}

#[test]
fn common_fields_are_validated_and_serialized() {
    let input = ConditionInput::new()
        .with_data(json!([1, 2]))
        .with_unit("m")
        .with_overlay("water")
        .with_report(false);
    let built = Condition::create("info", 2, &input).expect("info");
    let value = serde_json::to_value(&built.condition).expect("serialize");
    assert_eq!(value["unit"], json!("m"));
    assert_eq!(value["overlay"], json!("water"));
    assert_eq!(value["report"], json!(false));
    assert_eq!(value["opacity"], json!(1.0));

    let err = Condition::create("info", 2, &input.with_opacity(2.0)).expect_err("opacity");
    assert_eq!(err.category(), ErrorCategory::Range);
}

#[test]
fn input_round_trips_through_to_input() {
    let input = scale(ConditionInput::new())
        .with_data(json!([1, 2, 1]))
        .with_color_data(json!([1, 2, 3]))
        .with_heights(0, 5)
        .with_color_data_label("Water Temp", "K")
        .with_description("Level");
    let built = Condition::create("dynamic_level", 3, &input).expect("dynamic");
    let rebuilt = Condition::create("dynamic_level", 3, &built.condition.to_input())
        .expect("rebuilt");
    assert_eq!(rebuilt.condition, built.condition);
    assert_eq!(rebuilt.companion, built.companion);
}

#[test]
fn legacy_field_aliases_deserialize() {
    let input: ConditionInput = serde_json::from_value(json!({
        "data": [1, 2],
        "data_dynamic": [3, 4],
        "description_dynamic": "Temp",
        "color_scale": ["#fff", "#000"],
        "color_levels": [0, 1],
        "min_height": 0,
        "max_height": 1
    }))
    .expect("input");
    assert_eq!(input.color_data_description, "Temp");
    let built = Condition::create("level_dynamic", 2, &input).expect("legacy kind name");
    assert!(built.companion.is_some());
}
