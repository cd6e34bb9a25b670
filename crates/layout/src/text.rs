use css::ComputedStyle;

/// Layout can depend on this without knowing about the rendering toolkit.
pub trait TextMeasurer {
    /// Return the width of `text` in CSS px when rendered with `style`.
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32;

    /// Return the used value of `line-height: normal` for `style`.
    fn line_height(&self, style: &ComputedStyle) -> f32;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32 {
        (**self).measure(text, style)
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        (**self).line_height(style)
    }
}

/// Every character advances by the same fraction of the font size.
///
/// Good enough for monospace fonts, and for headless hosts that only need
/// stable, predictable geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance of one character, in em.
    pub advance_em: f32,
    /// `line-height: normal`, in em.
    pub line_height_em: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl FixedAdvanceMeasurer {
    pub fn new(advance_em: f32, line_height_em: f32) -> Self {
        Self {
            advance_em,
            line_height_em,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32 {
        text.chars().count() as f32 * self.advance_em * style.font_px()
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        self.line_height_em * style.font_px()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css::{FontSpec, Length};

    fn style(px: f32) -> ComputedStyle {
        ComputedStyle {
            font: FontSpec {
                size: Length::Px(px),
                ..FontSpec::default()
            },
            ..ComputedStyle::initial()
        }
    }

    #[test]
    fn advance_scales_with_font_size() {
        let m = FixedAdvanceMeasurer::new(0.5, 1.0);
        assert_eq!(m.measure("abcd", &style(10.0)), 20.0);
        assert_eq!(m.measure("abcd", &style(20.0)), 40.0);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let m = FixedAdvanceMeasurer::new(1.0, 1.0);
        assert_eq!(m.measure("€é", &style(10.0)), 20.0);
    }

    #[test]
    fn default_line_height_is_one_point_two_em() {
        let m = FixedAdvanceMeasurer::default();
        assert!((m.line_height(&style(10.0)) - 12.0).abs() < 1e-4);
    }
}
