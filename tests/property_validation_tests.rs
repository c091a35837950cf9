use proptest::prelude::*;
use serde_json::{Value, json};
use ssv::ErrorCategory;
use ssv::core::{validate_array, validate_color_scale};

fn hex(index: usize) -> Value {
    json!(format!("#{:06x}", (index * 0x1f3a7) % 0xff_ffff))
}

proptest! {
    #[test]
    fn time_bound_arrays_match_the_axis_or_fail_with_shape(
        len in 0usize..40,
        axis in 1usize..40,
        width in 1usize..4
    ) {
        let rows: Vec<Value> = (0..len)
            .map(|i| json!((0..width).map(|j| (i * width + j) as f64).collect::<Vec<_>>()))
            .collect();
        let result = validate_array::<f64>(&Value::Array(rows), "data", Some(2), Some(2), Some(axis));
        if len == axis {
            let array = result.expect("matching length");
            prop_assert_eq!(array.shape(), &[axis, width][..]);
            prop_assert_eq!(array.values().len(), axis * width);
        } else {
            prop_assert_eq!(result.expect_err("length differs").category(), ErrorCategory::Shape);
        }
    }

    #[test]
    fn color_scales_pair_colors_with_levels(colors in 1usize..12, levels in 1usize..12) {
        let scale: Vec<Value> = (0..colors).map(hex).collect();
        let steps: Vec<Value> = (0..levels).map(|i| json!(i as f64)).collect();
        let result = validate_color_scale(&Value::Array(scale), &Value::Array(steps));
        if colors == levels {
            let scale = result.expect("paired");
            prop_assert_eq!(scale.len(), colors);
            prop_assert_eq!(scale.levels().len(), levels);
        } else {
            prop_assert_eq!(
                result.expect_err("unpaired").category(),
                ErrorCategory::LengthMismatch
            );
        }
    }
}
