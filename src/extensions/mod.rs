//! Secondary annotations attachable to a single element.

pub mod popover;

pub use popover::{DEFAULT_POPOVER_DIMS, Popover, PopoverInput, PopoverKind};
