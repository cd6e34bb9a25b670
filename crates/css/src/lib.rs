pub mod computed;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use computed::{ComputedStyle, Edges, FontSpec, LAYOUT_PROPERTIES, compute_style};
pub use syntax::{Declaration, parse_declarations};
pub use values::{
    BoxSizing, Length, LineHeight, Overflow, OverflowWrap, TabSize, TextAlign, TextTransform,
    WhiteSpace, parse_length, parse_line_height, parse_px,
};
