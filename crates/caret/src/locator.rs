use crate::backend::{MeasurementBackend, MeasurementSurface};
use crate::error::LocateError;
use crate::mirror::{mirror_content, mirror_style};
use core_types::TextDirection;
use input_core::TextField;

/// Raw caret position inside the field's border box, before scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaretCoordinates {
    pub top: f32,
    pub left: f32,
    /// Computed line height, truncated to whole px.
    pub height: f32,
}

/// Which edge of the viewport the anchor is measured from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HorizontalAnchor {
    Left(f32),
    /// Distance from the right edge of the root element's client area.
    Right(f32),
}

/// Where an overlay should open for the current caret: one line below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaretAnchor {
    pub top: f32,
    pub horizontal: HorizontalAnchor,
    pub line_height: f32,
    /// Current viewport top of the field's bounding rect.
    pub client_top: f32,
    /// Inner height of the hosting window, for bounding overlays.
    pub viewport_height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CaretOptions {
    /// Leave the measurement surface on screen with the marker highlighted.
    pub debug: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DocumentOffset {
    top: f32,
    left: f32,
}

/// Computes pixel coordinates of a caret offset without native caret APIs, by
/// replaying the field's text layout on a measurement surface.
#[derive(Debug)]
pub struct CaretLocator<B> {
    backend: B,
    options: CaretOptions,
}

impl<B: MeasurementBackend> CaretLocator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            options: CaretOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CaretOptions) -> Self {
        self.options = options;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Position of `offset` relative to the field's border box, ignoring
    /// scroll.
    pub fn caret_coordinates<F: TextField + ?Sized>(
        &self,
        field: &F,
        offset: usize,
    ) -> Result<CaretCoordinates, LocateError> {
        if !self.backend.is_windowed() {
            return Err(LocateError::NotWindowed);
        }

        let kind = field.kind();
        let mut computed = self.backend.computed_style(field);
        // the mirror lays out in the same direction the anchor is taken from
        computed.direction = field.direction();
        let debug = self.options.debug;

        let mut surface = self.backend.create_measurement_surface();
        let style = mirror_style(kind, &computed, debug, || {
            self.backend.normal_line_height(kind, &computed)
        });
        if debug {
            let declarations: Vec<String> = style
                .style
                .to_declarations()
                .into_iter()
                .map(|d| format!("{}: {}", d.name, d.value))
                .collect();
            log::debug!(target: "caret", "mirror style: {}", declarations.join("; "));
        }
        surface.apply_style(&style);

        let (before, marker) = mirror_content(kind, field.value(), offset);
        surface.set_text(&before);
        surface.append_marker(&marker);

        let marker_box = self.backend.measure(&surface);
        let height = computed
            .line_height
            .resolve(computed.font_px(), || {
                self.backend.normal_line_height(kind, &computed)
            })
            .trunc();

        let coordinates = CaretCoordinates {
            top: marker_box.offset_top + computed.border.top.trunc(),
            left: marker_box.offset_left + computed.border.left.trunc(),
            height,
        };

        if debug {
            surface.highlight_marker();
            self.backend.retain_for_inspection(surface);
        } else {
            self.backend.remove_measurement_surface(surface);
        }

        Ok(coordinates)
    }

    /// Viewport anchor one line below the caret at the field's selection end.
    ///
    /// `scale` is the zoom factor of the canvas hosting the field. It applies
    /// to the vertical axis only; horizontal positions are already reported
    /// in screen space by the host.
    pub fn caret_anchor<F: TextField + ?Sized>(
        &self,
        field: &F,
        scale: f32,
    ) -> Result<CaretAnchor, LocateError> {
        if !self.backend.is_windowed() {
            return Err(LocateError::NotWindowed);
        }

        let document = field.owner_document().ok_or(LocateError::NoOwnerDocument)?;
        let window = document.window.ok_or(LocateError::NoWindow)?;
        let element = element_offset(field)?;
        let scroll = field.scroll();
        let caret = self.caret_coordinates(field, field.selection_end())?;
        let line_height = self.line_height_px(field);

        let top = element.top - scroll.top * scale + (caret.top + line_height) * scale;
        let left = element.left - scroll.left + caret.left;

        let horizontal = match field.direction() {
            TextDirection::Ltr => HorizontalAnchor::Left(left),
            TextDirection::Rtl => {
                let client_width = document.root.map(|r| r.client_width);
                HorizontalAnchor::Right(client_width.map_or(0.0, |w| w - left))
            }
        };

        log::trace!("caret anchor top={top} {horizontal:?} line_height={line_height}");

        Ok(CaretAnchor {
            top,
            horizontal,
            line_height,
            client_top: field.bounding_rect().top(),
            viewport_height: window.inner_height,
        })
    }

    /// Computed line height in px; `normal` is measured by the backend.
    pub fn line_height_px<F: TextField + ?Sized>(&self, field: &F) -> f32 {
        let style = self.backend.computed_style(field);
        style.line_height.resolve(style.font_px(), || {
            self.backend.normal_line_height(field.kind(), &style)
        })
    }
}

/// Document-relative offset of the field's border box.
fn element_offset<F: TextField + ?Sized>(field: &F) -> Result<DocumentOffset, LocateError> {
    let rect = field.bounding_rect();
    let document = field.owner_document().ok_or(LocateError::NoOwnerDocument)?;
    let window = document.window.ok_or(LocateError::NoWindow)?;

    let mut offset = DocumentOffset {
        top: rect.top() + window.page_y_offset,
        left: rect.left() + window.page_x_offset,
    };
    if let Some(root) = document.root {
        offset.top -= root.client_top;
        offset.left -= root.client_left;
    }
    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MarkerBox;
    use crate::mirror::MirrorStyle;
    use core_types::{Rect, ScrollOffset};
    use css::{ComputedStyle, Edges, LineHeight};
    use input_core::{
        DocumentMetrics, FieldKind, MemoryField, RootMetrics, SelectionRange, WindowMetrics,
    };
    use std::cell::RefCell;

    /// Lays text out on a 10px grid, no wrapping, and records every surface.
    #[derive(Default)]
    struct GridBackend {
        windowed: bool,
        removed: RefCell<usize>,
        retained: RefCell<Vec<GridSurface>>,
    }

    #[derive(Clone, Debug, Default)]
    struct GridSurface {
        style: Option<MirrorStyle>,
        text: String,
        marker: String,
        highlighted: bool,
    }

    impl MeasurementSurface for GridSurface {
        fn apply_style(&mut self, style: &MirrorStyle) {
            self.style = Some(style.clone());
        }
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
        }
        fn append_marker(&mut self, text: &str) {
            self.marker = text.to_string();
        }
        fn highlight_marker(&mut self) {
            self.highlighted = true;
        }
    }

    impl GridBackend {
        fn windowed() -> Self {
            Self {
                windowed: true,
                ..Self::default()
            }
        }
    }

    impl MeasurementBackend for GridBackend {
        type Surface = GridSurface;

        fn is_windowed(&self) -> bool {
            self.windowed
        }

        fn create_measurement_surface(&self) -> GridSurface {
            GridSurface::default()
        }

        fn measure(&self, surface: &GridSurface) -> MarkerBox {
            let style = &surface.style.as_ref().expect("styled").style;
            let line_h = style.line_height.resolve(style.font_px(), || 20.0);
            let lines = surface.text.split('\n').count() - 1;
            let col = surface.text.rsplit('\n').next().unwrap_or("").chars().count();
            MarkerBox {
                offset_top: style.padding.top + lines as f32 * line_h,
                offset_left: style.padding.left + col as f32 * 10.0,
            }
        }

        fn normal_line_height(&self, _kind: FieldKind, _style: &ComputedStyle) -> f32 {
            20.0
        }

        fn remove_measurement_surface(&self, _surface: GridSurface) {
            *self.removed.borrow_mut() += 1;
        }

        fn retain_for_inspection(&self, surface: GridSurface) {
            let mut retained = self.retained.borrow_mut();
            retained.clear();
            retained.push(surface);
        }
    }

    fn styled_field(value: &str) -> MemoryField {
        let style = ComputedStyle {
            padding: Edges {
                top: 2.0,
                left: 3.0,
                ..Edges::zero()
            },
            border: Edges {
                top: 1.0,
                left: 1.0,
                ..Edges::zero()
            },
            line_height: LineHeight::Px(16.0),
            ..ComputedStyle::initial()
        };
        MemoryField::new(FieldKind::MultiLine)
            .with_value(value)
            .with_style(style)
            .with_rect(Rect::new(100.0, 50.0, 300.0, 100.0))
    }

    #[test]
    fn raw_coordinates_add_border_to_marker_offset() {
        let locator = CaretLocator::new(GridBackend::windowed());
        let field = styled_field("ab\ncd");

        let c = locator.caret_coordinates(&field, 4).unwrap();
        assert_eq!(c.top, 2.0 + 16.0 + 1.0);
        assert_eq!(c.left, 3.0 + 10.0 + 1.0);
        assert_eq!(c.height, 16.0);
        assert_eq!(*locator.backend().removed.borrow(), 1);
    }

    #[test]
    fn anchor_sits_one_line_below_the_caret() {
        let locator = CaretLocator::new(GridBackend::windowed());
        let field = styled_field("abc");

        let a = locator.caret_anchor(&field, 1.0).unwrap();
        // element 50 + caret top (2 + 1) + line 16
        assert_eq!(a.top, 50.0 + 3.0 + 16.0);
        assert_eq!(a.horizontal, HorizontalAnchor::Left(100.0 + 3.0 + 30.0 + 1.0));
        assert_eq!(a.line_height, 16.0);
        assert_eq!(a.client_top, 50.0);
        assert_eq!(a.viewport_height, 768.0);
    }

    #[test]
    fn anchor_uses_selection_end() {
        let locator = CaretLocator::new(GridBackend::windowed());
        let mut field = styled_field("abcdef");
        field.set_selection(SelectionRange::new(1, 4));

        let a = locator.caret_anchor(&field, 1.0).unwrap();
        assert_eq!(a.horizontal, HorizontalAnchor::Left(100.0 + 3.0 + 40.0 + 1.0));
    }

    #[test]
    fn scroll_and_scale_apply_per_axis() {
        let locator = CaretLocator::new(GridBackend::windowed());
        let mut field = styled_field("abc");
        field.set_scroll(ScrollOffset {
            top: 10.0,
            left: 5.0,
        });

        let a = locator.caret_anchor(&field, 2.0).unwrap();
        assert_eq!(a.top, 50.0 - 10.0 * 2.0 + (3.0 + 16.0) * 2.0);
        // horizontal scroll is not scaled
        assert_eq!(a.horizontal, HorizontalAnchor::Left(100.0 - 5.0 + 34.0));
    }

    #[test]
    fn page_scroll_and_root_border_shift_the_element() {
        let locator = CaretLocator::new(GridBackend::windowed());
        let field = styled_field("").with_document(Some(DocumentMetrics {
            window: Some(WindowMetrics {
                page_x_offset: 7.0,
                page_y_offset: 40.0,
                inner_width: 800.0,
                inner_height: 600.0,
            }),
            root: Some(RootMetrics {
                client_top: 2.0,
                client_left: 2.0,
                client_width: 800.0,
            }),
        }));

        let a = locator.caret_anchor(&field, 1.0).unwrap();
        assert_eq!(a.top, 50.0 + 40.0 - 2.0 + 3.0 + 16.0);
        assert_eq!(a.horizontal, HorizontalAnchor::Left(100.0 + 7.0 - 2.0 + 4.0));
        assert_eq!(a.viewport_height, 600.0);
    }

    #[test]
    fn rtl_fields_anchor_from_the_right() {
        let locator = CaretLocator::new(GridBackend::windowed());
        let field = styled_field("ab").with_dir(TextDirection::Rtl);

        let a = locator.caret_anchor(&field, 1.0).unwrap();
        let left = 100.0 + 3.0 + 20.0 + 1.0;
        assert_eq!(a.horizontal, HorizontalAnchor::Right(1024.0 - left));
    }

    #[test]
    fn normal_line_height_comes_from_backend() {
        let locator = CaretLocator::new(GridBackend::windowed());
        let field = MemoryField::new(FieldKind::MultiLine);
        assert_eq!(locator.line_height_px(&field), 20.0);
    }

    #[test]
    fn unitless_line_height_scales_with_font() {
        let locator = CaretLocator::new(GridBackend::windowed());
        let style = ComputedStyle {
            line_height: LineHeight::Number(1.5),
            ..ComputedStyle::initial()
        };
        let field = MemoryField::new(FieldKind::MultiLine).with_style(style);
        assert_eq!(locator.line_height_px(&field), 24.0);
    }

    #[test]
    fn environment_errors() {
        let field = styled_field("abc");
        let headless = CaretLocator::new(GridBackend::default());
        assert_eq!(headless.caret_anchor(&field, 1.0), Err(LocateError::NotWindowed));
        assert_eq!(
            headless.caret_coordinates(&field, 0),
            Err(LocateError::NotWindowed)
        );

        let locator = CaretLocator::new(GridBackend::windowed());
        let detached = styled_field("abc").with_document(None);
        assert_eq!(
            locator.caret_anchor(&detached, 1.0),
            Err(LocateError::NoOwnerDocument)
        );

        let windowless = styled_field("abc").with_document(Some(DocumentMetrics::default()));
        assert_eq!(locator.caret_anchor(&windowless, 1.0), Err(LocateError::NoWindow));
    }

    #[test]
    fn debug_keeps_the_latest_surface_highlighted() {
        let locator =
            CaretLocator::new(GridBackend::windowed()).with_options(CaretOptions { debug: true });
        let field = styled_field("abc def");

        locator.caret_coordinates(&field, 2).unwrap();
        locator.caret_coordinates(&field, 4).unwrap();

        let retained = locator.backend().retained.borrow();
        assert_eq!(retained.len(), 1);
        assert!(retained[0].highlighted);
        assert_eq!(retained[0].text, "abc ");
        assert_eq!(retained[0].marker, "def");
        assert!(retained[0].style.as_ref().unwrap().visible);
        assert_eq!(*locator.backend().removed.borrow(), 0);
    }
}
