/// CSS Length value. Computed styles resolve everything to `px`, so that is
/// all we carry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
}

impl Length {
    #[inline]
    pub fn px(self) -> f32 {
        let Length::Px(px) = self;
        px
    }
}

/// Computed `line-height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineHeight {
    /// `normal`: depends on the font, only a text engine can answer.
    Normal,
    /// Unitless multiplier of the font size.
    Number(f32),
    Px(f32),
}

impl LineHeight {
    /// Resolve to px. `normal_px` is consulted only for [`LineHeight::Normal`].
    pub fn resolve(self, font_px: f32, normal_px: impl FnOnce() -> f32) -> f32 {
        match self {
            LineHeight::Normal => normal_px(),
            LineHeight::Number(n) => n * font_px,
            LineHeight::Px(px) => px,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhiteSpace {
    #[default]
    Normal,
    Pre,
    PreWrap,
    PreLine,
    NoWrap,
}

impl WhiteSpace {
    pub fn wraps(self) -> bool {
        !matches!(self, WhiteSpace::Pre | WhiteSpace::NoWrap)
    }
}

/// `word-wrap` / `overflow-wrap`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowWrap {
    #[default]
    Normal,
    BreakWord,
    Anywhere,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

/// Computed `tab-size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TabSize {
    /// Multiple of the advance of a space.
    Spaces(f32),
    Px(f32),
}

impl Default for TabSize {
    fn default() -> Self {
        TabSize::Spaces(8.0)
    }
}

/// Parse `<number>px`. Negative and non-finite values are rejected.
pub fn parse_px(value: &str) -> Option<f32> {
    let v = value.trim();
    let stripped = v.strip_suffix("px")?;
    let num = stripped.trim().parse::<f32>().ok()?;
    (num.is_finite() && num >= 0.0).then_some(num)
}

/// Parse a `font-size` value into a Length.
/// Computed font sizes are always `NNpx` (e.g., "16px", "12.5px").
pub fn parse_length(value: &str) -> Option<Length> {
    let num = parse_px(value)?;
    (num > 0.0).then_some(Length::Px(num))
}

/// Parse a spacing value (`letter-spacing`, `word-spacing`, `text-indent`).
/// `normal` is zero; spacing may be negative.
pub fn parse_spacing(value: &str) -> Option<f32> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("normal") {
        return Some(0.0);
    }
    let num = v.strip_suffix("px")?.trim().parse::<f32>().ok()?;
    num.is_finite().then_some(num)
}

/// Parse a computed `line-height`.
///
/// The computed value is `normal`, a unitless number, or a px length. The
/// leading character tells a number apart from a keyword, the trailing one a
/// bare number from a length.
pub fn parse_line_height(value: &str) -> Option<LineHeight> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("normal") {
        return Some(LineHeight::Normal);
    }
    let first = v.chars().next()?;
    if !first.is_ascii_digit() && first != '.' {
        return None;
    }
    if v.ends_with(|c: char| c.is_ascii_digit()) {
        let n = v.parse::<f32>().ok()?;
        return (n.is_finite() && n >= 0.0).then_some(LineHeight::Number(n));
    }
    parse_px(v).map(LineHeight::Px)
}

pub fn parse_box_sizing(value: &str) -> Option<BoxSizing> {
    match value.trim().to_ascii_lowercase().as_str() {
        "content-box" => Some(BoxSizing::ContentBox),
        "border-box" => Some(BoxSizing::BorderBox),
        _ => None,
    }
}

pub fn parse_white_space(value: &str) -> Option<WhiteSpace> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(WhiteSpace::Normal),
        "pre" => Some(WhiteSpace::Pre),
        "pre-wrap" => Some(WhiteSpace::PreWrap),
        "pre-line" => Some(WhiteSpace::PreLine),
        "nowrap" => Some(WhiteSpace::NoWrap),
        _ => None,
    }
}

pub fn parse_overflow_wrap(value: &str) -> Option<OverflowWrap> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(OverflowWrap::Normal),
        "break-word" => Some(OverflowWrap::BreakWord),
        "anywhere" => Some(OverflowWrap::Anywhere),
        _ => None,
    }
}

pub fn parse_text_align(value: &str) -> Option<TextAlign> {
    match value.trim().to_ascii_lowercase().as_str() {
        "start" => Some(TextAlign::Start),
        "end" => Some(TextAlign::End),
        "left" => Some(TextAlign::Left),
        "right" => Some(TextAlign::Right),
        "center" => Some(TextAlign::Center),
        "justify" => Some(TextAlign::Justify),
        _ => None,
    }
}

pub fn parse_text_transform(value: &str) -> Option<TextTransform> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" => Some(TextTransform::None),
        "uppercase" => Some(TextTransform::Uppercase),
        "lowercase" => Some(TextTransform::Lowercase),
        "capitalize" => Some(TextTransform::Capitalize),
        _ => None,
    }
}

pub fn parse_overflow(value: &str) -> Option<Overflow> {
    match value.trim().to_ascii_lowercase().as_str() {
        "visible" => Some(Overflow::Visible),
        "hidden" | "clip" => Some(Overflow::Hidden),
        "scroll" => Some(Overflow::Scroll),
        "auto" => Some(Overflow::Auto),
        _ => None,
    }
}

pub fn parse_tab_size(value: &str) -> Option<TabSize> {
    let v = value.trim();
    if let Some(px) = parse_px(v) {
        return Some(TabSize::Px(px));
    }
    let n = v.parse::<f32>().ok()?;
    (n.is_finite() && n >= 0.0).then_some(TabSize::Spaces(n))
}

pub fn parse_direction(value: &str) -> Option<core_types::TextDirection> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ltr" => Some(core_types::TextDirection::Ltr),
        "rtl" => Some(core_types::TextDirection::Rtl),
        _ => None,
    }
}
