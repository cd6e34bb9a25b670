/// A rectangle in CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }
}

/// Scroll offsets of a scrollable box, in CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffset {
    pub top: f32,
    pub left: f32,
}

/// Inline base direction of a text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        matches!(self, TextDirection::Rtl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
    }

    #[test]
    fn direction_defaults_to_ltr() {
        assert_eq!(TextDirection::default(), TextDirection::Ltr);
        assert!(TextDirection::Rtl.is_rtl());
    }
}
