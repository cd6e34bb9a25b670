use css::{BoxSizing, ComputedStyle, LineHeight, Overflow, OverflowWrap, WhiteSpace};
use input_core::{FieldKind, clamp_to_char_boundary};

/// Stand-in content for the marker when the caret is at the very end: an
/// empty inline box collapses and has no position.
pub const MARKER_PLACEHOLDER: &str = ".";

const NBSP: char = '\u{00A0}';

/// Style of the measurement surface.
#[derive(Clone, Debug, PartialEq)]
pub struct MirrorStyle {
    /// The field's layout properties with the mirror overrides applied.
    pub style: ComputedStyle,
    /// Hidden surfaces still lay out; they are just not painted.
    pub visible: bool,
}

/// Copy every layout-relevant property of the field and force the surface
/// to wrap exactly like the field does.
///
/// `normal_line_height` resolves `line-height: normal`, needed only for the
/// single-line special case.
pub fn mirror_style(
    kind: FieldKind,
    computed: &ComputedStyle,
    debug: bool,
    normal_line_height: impl FnOnce() -> f32,
) -> MirrorStyle {
    let mut style = computed.clone();

    style.white_space = WhiteSpace::PreWrap;
    if kind == FieldKind::MultiLine {
        style.word_wrap = OverflowWrap::BreakWord;
    }
    // No scrollbar in the mirror, so it wraps at the same width.
    style.overflow_x = Overflow::Hidden;
    style.overflow_y = Overflow::Hidden;

    if kind == FieldKind::SingleLine {
        style.line_height = single_line_height(computed, normal_line_height);
    }

    MirrorStyle {
        style,
        visible: debug,
    }
}

/// Inputs render their single line vertically centered in the box, so the
/// computed `line-height` does not say where the text sits. Derive one from
/// the box instead.
fn single_line_height(computed: &ComputedStyle, normal_line_height: impl FnOnce() -> f32) -> LineHeight {
    let Some(height) = computed.height.map(|h| h.px().trunc()) else {
        return computed.line_height;
    };

    if computed.box_sizing != BoxSizing::BorderBox {
        return LineHeight::Px(height);
    }

    let outer = computed.padding.top.trunc()
        + computed.padding.bottom.trunc()
        + computed.border.top.trunc()
        + computed.border.bottom.trunc();
    let line = computed
        .line_height
        .resolve(computed.font_px(), normal_line_height)
        .trunc();
    let target = outer + line;

    if height > target {
        LineHeight::Px(height - outer)
    } else if height == target {
        computed.line_height
    } else {
        LineHeight::Px(0.0)
    }
}

/// Split the field value at `offset` into the surface's plain text and the
/// marker text.
///
/// The marker wraps the *whole* remainder: a long word straddling the caret
/// moves to the next line only if the text after the caret is present too.
pub fn mirror_content(kind: FieldKind, value: &str, offset: usize) -> (String, String) {
    let offset = clamp_to_char_boundary(value, offset);
    let (before, after) = value.split_at(offset);

    let before = match kind {
        // Inputs do not keep runs of spaces the way text areas do.
        FieldKind::SingleLine => before
            .chars()
            .map(|c| if c.is_whitespace() { NBSP } else { c })
            .collect(),
        FieldKind::MultiLine => before.to_string(),
    };

    let marker = if after.is_empty() {
        MARKER_PLACEHOLDER.to_string()
    } else {
        after.to_string()
    };

    (before, marker)
}
