use std::cell::RefCell;

use caret::{MarkerBox, MeasurementBackend, MeasurementSurface, MirrorStyle};
use css::ComputedStyle;
use input_core::FieldKind;

use crate::{TextMeasurer, layout_text};

/// Measurement surface backed by [`layout_text`].
#[derive(Clone, Debug, Default)]
pub struct LayoutSurface {
    style: Option<MirrorStyle>,
    text: String,
    marker: Option<String>,
    highlighted: bool,
}

impl LayoutSurface {
    pub fn style(&self) -> Option<&MirrorStyle> {
        self.style.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

impl MeasurementSurface for LayoutSurface {
    fn apply_style(&mut self, style: &MirrorStyle) {
        self.style = Some(style.clone());
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn append_marker(&mut self, text: &str) {
        self.marker = Some(text.to_string());
    }

    fn highlight_marker(&mut self) {
        self.highlighted = true;
    }
}

/// A [`MeasurementBackend`] that lays the surface out with a
/// [`TextMeasurer`] instead of a browser engine.
pub struct TextLayoutBackend<M> {
    measurer: M,
    windowed: bool,
    retained: RefCell<Option<LayoutSurface>>,
}

impl<M: TextMeasurer> TextLayoutBackend<M> {
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            windowed: true,
            retained: RefCell::new(None),
        }
    }

    /// A backend that reports no rendering environment; every caret lookup
    /// fails with `NotWindowed`.
    pub fn headless(measurer: M) -> Self {
        Self {
            windowed: false,
            ..Self::new(measurer)
        }
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Take the surface kept by the last debug measurement, if any.
    pub fn take_retained(&self) -> Option<LayoutSurface> {
        self.retained.borrow_mut().take()
    }
}

impl<M: TextMeasurer> MeasurementBackend for TextLayoutBackend<M> {
    type Surface = LayoutSurface;

    fn is_windowed(&self) -> bool {
        self.windowed
    }

    fn create_measurement_surface(&self) -> LayoutSurface {
        LayoutSurface::default()
    }

    fn measure(&self, surface: &LayoutSurface) -> MarkerBox {
        let initial;
        let style = match &surface.style {
            Some(m) => &m.style,
            None => {
                initial = ComputedStyle::initial();
                &initial
            }
        };

        let mut content = String::with_capacity(surface.text.len() + 1);
        content.push_str(&surface.text);
        content.push_str(surface.marker.as_deref().unwrap_or_default());

        let layout = layout_text(&self.measurer, &content, style);
        let (line, x) = layout.position_of(surface.text.len());
        let line_top = layout.lines().get(line).map(|l| l.top).unwrap_or(0.0);

        // An inline box sits in the middle of its line box: half the leading
        // goes above it.
        let half_leading = (layout.line_height() - self.measurer.line_height(style)) / 2.0;

        log::trace!(target: "layout", "marker at line {line}, x {x}");

        MarkerBox {
            offset_top: style.padding.top + line_top + half_leading,
            offset_left: style.padding.left + x,
        }
    }

    fn normal_line_height(&self, _kind: FieldKind, style: &ComputedStyle) -> f32 {
        self.measurer.line_height(style)
    }

    fn retain_for_inspection(&self, surface: LayoutSurface) {
        *self.retained.borrow_mut() = Some(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedAdvanceMeasurer;
    use caret::{CaretLocator, CaretOptions, LocateError, mirror_style};
    use css::{Edges, FontSpec, Length, LineHeight};
    use input_core::MemoryField;

    fn field_style() -> ComputedStyle {
        ComputedStyle {
            width: Some(Length::Px(60.0)),
            padding: Edges {
                top: 2.0,
                left: 3.0,
                ..Edges::zero()
            },
            font: FontSpec {
                size: Length::Px(10.0),
                ..FontSpec::default()
            },
            ..ComputedStyle::initial()
        }
    }

    fn backend() -> TextLayoutBackend<FixedAdvanceMeasurer> {
        TextLayoutBackend::new(FixedAdvanceMeasurer::default())
    }

    fn surface(text: &str, marker: &str, style: &ComputedStyle) -> LayoutSurface {
        let mut s = LayoutSurface::default();
        s.apply_style(&mirror_style(FieldKind::MultiLine, style, false, || 12.0));
        s.set_text(text);
        s.append_marker(marker);
        s
    }

    #[test]
    fn marker_offset_includes_padding() {
        let b = backend();
        let m = b.measure(&surface("abc", ".", &field_style()));
        assert!((m.offset_left - 21.0).abs() < 1e-3);
        assert!((m.offset_top - 2.0).abs() < 1e-3);
    }

    #[test]
    fn marker_follows_wrapped_words() {
        // 10 chars per line; the marker's word does not fit after "abcdef "
        let b = backend();
        let m = b.measure(&surface("abcdef gh", "ijk", &field_style()));
        assert!((m.offset_top - 14.0).abs() < 1e-3);
        assert!((m.offset_left - 15.0).abs() < 1e-3);
    }

    #[test]
    fn tall_lines_add_half_leading() {
        let style = ComputedStyle {
            line_height: LineHeight::Px(20.0),
            ..field_style()
        };
        let m = backend().measure(&surface("a\nb", ".", &style));
        // line 1 top 20, half leading 4
        assert!((m.offset_top - 26.0).abs() < 1e-3);
    }

    #[test]
    fn debug_measurement_keeps_a_highlighted_surface() {
        let field = MemoryField::new(FieldKind::MultiLine)
            .with_value("hello")
            .with_style(field_style());
        let locator = CaretLocator::new(backend()).with_options(CaretOptions { debug: true });
        locator.caret_coordinates(&field, 2).unwrap();
        let kept = locator.backend().take_retained().unwrap();
        assert_eq!(kept.text(), "he");
        assert_eq!(kept.marker(), Some("llo"));
        assert!(kept.is_highlighted());
        assert!(kept.style().unwrap().visible);
    }

    #[test]
    fn headless_backend_refuses_to_measure() {
        let field = MemoryField::new(FieldKind::MultiLine).with_value("x");
        let locator = CaretLocator::new(TextLayoutBackend::headless(FixedAdvanceMeasurer::default()));
        assert_eq!(locator.caret_coordinates(&field, 0), Err(LocateError::NotWindowed));
    }
}
