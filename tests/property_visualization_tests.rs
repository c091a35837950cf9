use proptest::prelude::*;
use serde_json::{Value, json};
use ssv::condition::ConditionInput;
use ssv::element::ElementOptions;
use ssv::{RenderMode, VisConfig, VisError, Visualization};

fn image(ids: usize) -> String {
    let body: String = (0..ids).map(|i| format!(r#"<rect id="r{i}"/>"#)).collect();
    format!(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">{body}</svg>"#)
}

fn series(len: usize, offset: usize) -> Value {
    json!((0..len).map(|i| ((i + offset) % 7) as f64).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn failed_registration_never_changes_reservations(
        taken in 1usize..6,
        extra in 0usize..6,
        clash in 0usize..6
    ) {
        let mut vis = Visualization::from_markup(&json!([0, 1]), "s", image(12), VisConfig::default())
            .expect("visualization");
        let first: Vec<String> = (0..taken).map(|i| format!("r{i}")).collect();
        vis.add_element("cell", first, "", &ElementOptions::default()).expect("first");
        let before: Vec<String> = vis.reserved_ids().map(str::to_owned).collect();

        let mut second: Vec<String> = (0..extra).map(|i| format!("r{}", 6 + i)).collect();
        let clashing = format!("r{}", clash % taken);
        second.push(clashing.clone());
        let err = vis
            .add_element("cell", second, "", &ElementOptions::default())
            .expect_err("clash");
        let names_clash = matches!(err, VisError::DuplicateId { ref id } if *id == clashing);
        prop_assert!(names_clash, "expected DuplicateId for {}", clashing);

        let after: Vec<String> = vis.reserved_ids().map(str::to_owned).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn cell_conditions_keep_insertion_order(count in 1usize..12, len in 1usize..8) {
        let axis = series(len, 0);
        let mut vis = Visualization::from_markup(&axis, "s", image(1), VisConfig::default())
            .expect("visualization");
        let cell = vis.add_element("cell", "r0", "", &ElementOptions::default()).expect("cell");
        for i in 0..count {
            let input = ConditionInput::new()
                .with_data(series(len, i))
                .with_description(format!("c{i}"));
            cell.add_condition("info", &input).expect("info");
        }
        let order: Vec<String> = cell.conditions().iter().map(|c| c.description().to_owned()).collect();
        let expected: Vec<String> = (0..count).map(|i| format!("c{i}")).collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn rendering_and_rebuilding_are_stable(elements in 1usize..6, bound in 0usize..6, len in 1usize..6) {
        let mut vis = Visualization::from_markup(&series(len, 0), "s", image(bound), VisConfig::default())
            .expect("visualization");
        for i in 0..elements {
            vis.add_element("cell", vec![format!("r{i}"), format!("x{i}")], "", &ElementOptions::default())
                .expect("cell")
                .add_condition("info", &ConditionInput::new().with_data(series(len, i)))
                .expect("info");
            if i % 2 == 0 {
                let key = format!("x{i}");
                prop_assert!(vis.delete_element(&key));
            }
        }

        let json = vis.description().to_json_pretty().expect("json");
        let described = ssv::VisDescription::from_json_str(&json).expect("parse");
        let rebuilt = Visualization::from_description(&described).expect("rebuild");
        prop_assert_eq!(
            vis.elements().collect::<Vec<_>>(),
            rebuilt.elements().collect::<Vec<_>>()
        );

        let first = vis.render(RenderMode::Full).expect("first");
        let second = vis.render(RenderMode::Full).expect("second");
        prop_assert_eq!(&first.payload, &second.payload);
        prop_assert_eq!(first.payload.element_data["cell"].len(), elements.min(bound));
    }
}
