use crate::syntax::Declaration;
use crate::values::{
    BoxSizing, Length, LineHeight, Overflow, OverflowWrap, TabSize, TextAlign, TextTransform,
    WhiteSpace, parse_box_sizing, parse_direction, parse_length, parse_line_height,
    parse_overflow, parse_overflow_wrap, parse_px, parse_spacing, parse_tab_size,
    parse_text_align, parse_text_transform, parse_white_space,
};
use core_types::TextDirection;

/// Every property that influences where text wraps inside a text field.
///
/// Longhands only: some engines never fold `padding-top` and friends back
/// into their shorthand, so each side is listed on its own.
pub const LAYOUT_PROPERTIES: &[&str] = &[
    "direction",
    "box-sizing",
    "width",
    "height",
    "overflow-x",
    "overflow-y",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-style",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "font-style",
    "font-variant",
    "font-weight",
    "font-stretch",
    "font-size",
    "font-size-adjust",
    "line-height",
    "font-family",
    "text-align",
    "text-transform",
    "text-indent",
    "text-decoration",
    "letter-spacing",
    "word-spacing",
    "tab-size",
    "white-space",
    "word-wrap",
];

/// Per-side widths in CSS px (padding or border).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn zero() -> Self {
        Edges::default()
    }

    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }
}

/// The components of the `font` shorthand.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub style: String,
    pub variant: String,
    pub weight: String,
    pub stretch: String,
    /// Initial: 16px.
    pub size: Length,
    pub size_adjust: Option<f32>,
    pub family: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec {
            style: "normal".to_string(),
            variant: "normal".to_string(),
            weight: "400".to_string(),
            stretch: "100%".to_string(),
            size: Length::Px(16.0),
            size_adjust: None,
            family: "monospace".to_string(),
        }
    }
}

/// Snapshot of the layout-relevant computed style of a text field.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    pub direction: TextDirection,
    pub box_sizing: BoxSizing,

    /// `None` is `auto`.
    pub width: Option<Length>,
    pub height: Option<Length>,

    pub overflow_x: Overflow,
    pub overflow_y: Overflow,

    pub border: Edges,
    pub border_style: String,
    pub padding: Edges,

    pub font: FontSpec,
    pub line_height: LineHeight,

    pub text_align: TextAlign,
    pub text_transform: TextTransform,
    pub text_indent: f32,
    pub text_decoration: String,

    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub tab_size: TabSize,

    pub white_space: WhiteSpace,
    pub word_wrap: OverflowWrap,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        ComputedStyle::initial()
    }
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            direction: TextDirection::Ltr,
            box_sizing: BoxSizing::ContentBox,
            width: None,
            height: None,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            border: Edges::zero(),
            border_style: "none".to_string(),
            padding: Edges::zero(),
            font: FontSpec::default(),
            line_height: LineHeight::Normal,
            text_align: TextAlign::Start,
            text_transform: TextTransform::None,
            text_indent: 0.0,
            text_decoration: "none".to_string(),
            letter_spacing: 0.0,
            word_spacing: 0.0,
            tab_size: TabSize::default(),
            white_space: WhiteSpace::Normal,
            word_wrap: OverflowWrap::Normal,
        }
    }

    #[inline]
    pub fn font_px(&self) -> f32 {
        self.font.size.px()
    }

    /// Width available to text: `width` minus padding and border when
    /// `box-sizing: border-box`. `None` when the width is `auto`.
    pub fn content_width(&self) -> Option<f32> {
        let Length::Px(w) = self.width?;
        let inner = match self.box_sizing {
            BoxSizing::ContentBox => w,
            BoxSizing::BorderBox => w - self.padding.horizontal() - self.border.horizontal(),
        };
        Some(inner.max(0.0))
    }

    /// Serialize back into declarations, in [`LAYOUT_PROPERTIES`] order.
    pub fn to_declarations(&self) -> Vec<Declaration> {
        fn px(v: f32) -> String {
            format!("{v}px")
        }
        fn len(v: Option<Length>) -> String {
            v.map(|l| px(l.px())).unwrap_or_else(|| "auto".to_string())
        }

        LAYOUT_PROPERTIES
            .iter()
            .map(|&name| {
                let value = match name {
                    "direction" => match self.direction {
                        TextDirection::Ltr => "ltr".to_string(),
                        TextDirection::Rtl => "rtl".to_string(),
                    },
                    "box-sizing" => match self.box_sizing {
                        BoxSizing::ContentBox => "content-box".to_string(),
                        BoxSizing::BorderBox => "border-box".to_string(),
                    },
                    "width" => len(self.width),
                    "height" => len(self.height),
                    "overflow-x" => overflow_keyword(self.overflow_x).to_string(),
                    "overflow-y" => overflow_keyword(self.overflow_y).to_string(),
                    "border-top-width" => px(self.border.top),
                    "border-right-width" => px(self.border.right),
                    "border-bottom-width" => px(self.border.bottom),
                    "border-left-width" => px(self.border.left),
                    "border-style" => self.border_style.clone(),
                    "padding-top" => px(self.padding.top),
                    "padding-right" => px(self.padding.right),
                    "padding-bottom" => px(self.padding.bottom),
                    "padding-left" => px(self.padding.left),
                    "font-style" => self.font.style.clone(),
                    "font-variant" => self.font.variant.clone(),
                    "font-weight" => self.font.weight.clone(),
                    "font-stretch" => self.font.stretch.clone(),
                    "font-size" => px(self.font_px()),
                    "font-size-adjust" => self
                        .font
                        .size_adjust
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "none".to_string()),
                    "line-height" => match self.line_height {
                        LineHeight::Normal => "normal".to_string(),
                        LineHeight::Number(n) => n.to_string(),
                        LineHeight::Px(v) => px(v),
                    },
                    "font-family" => self.font.family.clone(),
                    "text-align" => match self.text_align {
                        TextAlign::Start => "start",
                        TextAlign::End => "end",
                        TextAlign::Left => "left",
                        TextAlign::Right => "right",
                        TextAlign::Center => "center",
                        TextAlign::Justify => "justify",
                    }
                    .to_string(),
                    "text-transform" => match self.text_transform {
                        TextTransform::None => "none",
                        TextTransform::Uppercase => "uppercase",
                        TextTransform::Lowercase => "lowercase",
                        TextTransform::Capitalize => "capitalize",
                    }
                    .to_string(),
                    "text-indent" => px(self.text_indent),
                    "text-decoration" => self.text_decoration.clone(),
                    "letter-spacing" => px(self.letter_spacing),
                    "word-spacing" => px(self.word_spacing),
                    "tab-size" => match self.tab_size {
                        TabSize::Spaces(n) => n.to_string(),
                        TabSize::Px(v) => px(v),
                    },
                    "white-space" => match self.white_space {
                        WhiteSpace::Normal => "normal",
                        WhiteSpace::Pre => "pre",
                        WhiteSpace::PreWrap => "pre-wrap",
                        WhiteSpace::PreLine => "pre-line",
                        WhiteSpace::NoWrap => "nowrap",
                    }
                    .to_string(),
                    "word-wrap" => match self.word_wrap {
                        OverflowWrap::Normal => "normal",
                        OverflowWrap::BreakWord => "break-word",
                        OverflowWrap::Anywhere => "anywhere",
                    }
                    .to_string(),
                    _ => String::new(),
                };
                Declaration {
                    name: name.to_string(),
                    value,
                }
            })
            .collect()
    }
}

fn overflow_keyword(o: Overflow) -> &'static str {
    match o {
        Overflow::Visible => "visible",
        Overflow::Hidden => "hidden",
        Overflow::Scroll => "scroll",
        Overflow::Auto => "auto",
    }
}

/// Build a [`ComputedStyle`] from resolved declarations, e.g. the output of
/// the host's computed-style lookup.
///
/// Assumptions:
/// - values are already computed (lengths in px)
/// - property names are lowercase (from `parse_declarations`).
///
/// Unparseable values leave the initial value in place; unknown properties are
/// ignored.
pub fn compute_style(specified: &[Declaration]) -> ComputedStyle {
    let mut result = ComputedStyle::initial();

    for Declaration { name, value } in specified {
        let value = value.as_str();

        match name.as_str() {
            "direction" => {
                if let Some(d) = parse_direction(value) {
                    result.direction = d;
                }
            }
            "box-sizing" => {
                if let Some(b) = parse_box_sizing(value) {
                    result.box_sizing = b;
                }
            }
            "width" => {
                if value.trim().eq_ignore_ascii_case("auto") {
                    result.width = None;
                } else if let Some(px) = parse_px(value) {
                    result.width = Some(Length::Px(px));
                }
            }
            "height" => {
                if value.trim().eq_ignore_ascii_case("auto") {
                    result.height = None;
                } else if let Some(px) = parse_px(value) {
                    result.height = Some(Length::Px(px));
                }
            }
            "overflow" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow_x = o;
                    result.overflow_y = o;
                }
            }
            "overflow-x" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow_x = o;
                }
            }
            "overflow-y" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow_y = o;
                }
            }

            // --- Borders (px only) ---
            "border-top-width" => set_px(&mut result.border.top, value),
            "border-right-width" => set_px(&mut result.border.right, value),
            "border-bottom-width" => set_px(&mut result.border.bottom, value),
            "border-left-width" => set_px(&mut result.border.left, value),
            "border-style" => result.border_style = value.trim().to_string(),

            // --- Padding (px only) ---
            "padding-top" => set_px(&mut result.padding.top, value),
            "padding-right" => set_px(&mut result.padding.right, value),
            "padding-bottom" => set_px(&mut result.padding.bottom, value),
            "padding-left" => set_px(&mut result.padding.left, value),

            // --- Font ---
            "font-style" => result.font.style = value.trim().to_string(),
            "font-variant" => result.font.variant = value.trim().to_string(),
            "font-weight" => result.font.weight = value.trim().to_string(),
            "font-stretch" => result.font.stretch = value.trim().to_string(),
            "font-size" => {
                if let Some(len) = parse_length(value) {
                    result.font.size = len;
                }
            }
            "font-size-adjust" => {
                result.font.size_adjust = value.trim().parse::<f32>().ok();
            }
            "font-family" => result.font.family = value.trim().to_string(),
            "line-height" => {
                if let Some(lh) = parse_line_height(value) {
                    result.line_height = lh;
                }
            }

            // --- Text ---
            "text-align" => {
                if let Some(a) = parse_text_align(value) {
                    result.text_align = a;
                }
            }
            "text-transform" => {
                if let Some(t) = parse_text_transform(value) {
                    result.text_transform = t;
                }
            }
            "text-indent" => {
                if let Some(v) = parse_spacing(value) {
                    result.text_indent = v;
                }
            }
            "text-decoration" => result.text_decoration = value.trim().to_string(),
            "letter-spacing" => {
                if let Some(v) = parse_spacing(value) {
                    result.letter_spacing = v;
                }
            }
            "word-spacing" => {
                if let Some(v) = parse_spacing(value) {
                    result.word_spacing = v;
                }
            }
            "tab-size" | "-moz-tab-size" => {
                if let Some(t) = parse_tab_size(value) {
                    result.tab_size = t;
                }
            }
            "white-space" => {
                if let Some(ws) = parse_white_space(value) {
                    result.white_space = ws;
                }
            }
            "word-wrap" | "overflow-wrap" => {
                if let Some(w) = parse_overflow_wrap(value) {
                    result.word_wrap = w;
                }
            }
            _ => {
                // unsupported property → ignored (CSS spec: unknown declarations are ignored)
            }
        }
    }

    result
}

fn set_px(slot: &mut f32, value: &str) {
    if let Some(px) = parse_px(value) {
        *slot = px;
    }
}
