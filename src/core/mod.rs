pub mod array;
pub mod color;
pub mod time_series;
pub mod validators;

pub use array::{ArrayElement, ArrayInput, NdArray};
pub use color::{ColorScale, is_hex_color};
pub use time_series::{TimeSeries, format_scientific};
pub use validators::{
    validate_array, validate_array_slices, validate_color, validate_color_scale,
    validate_colors, validate_heights, validate_opacity,
};
