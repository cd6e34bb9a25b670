use std::ops::Range;

use css::{ComputedStyle, OverflowWrap, TabSize, TextAlign, TextTransform};

use crate::TextMeasurer;
use crate::tokens::{Token, tokenize};

/// One laid-out line of preserved-white-space text.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBox {
    /// Source bytes on this line, without the terminating hard break.
    pub range: Range<usize>,
    /// Top of the line box, relative to the content edge.
    pub top: f32,
    pub height: f32,
    /// Advance of the line's content; trailing spaces hang and are not
    /// counted.
    pub width: f32,
    /// Shift applied by `text-align`.
    pub align_offset: f32,
    /// Left edge of every character that starts on this line, in source
    /// order, relative to the line start.
    stops: Vec<(usize, f32)>,
    /// Pen position after the last character, hanging spaces included.
    end_x: f32,
}

impl LineBox {
    /// Left edge of the character starting at byte `offset`, relative to the
    /// content edge, if that character is on this line.
    pub fn x_of(&self, offset: usize) -> Option<f32> {
        self.stops
            .binary_search_by_key(&offset, |&(at, _)| at)
            .ok()
            .map(|i| self.align_offset + self.stops[i].1)
    }

    pub fn end_x(&self) -> f32 {
        self.align_offset + self.end_x
    }
}

/// Result of [`layout_text`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    lines: Vec<LineBox>,
    line_height: f32,
}

impl TextLayout {
    pub fn lines(&self) -> &[LineBox] {
        &self.lines
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    /// Line index and x of the character starting at `offset`. Offsets past
    /// the last character map to the end of the last line.
    pub fn position_of(&self, offset: usize) -> (usize, f32) {
        for (i, line) in self.lines.iter().enumerate() {
            if let Some(x) = line.x_of(offset) {
                return (i, x);
            }
        }

        let idx = self
            .lines
            .iter()
            .rposition(|l| l.range.start <= offset)
            .unwrap_or(0);
        let x = self.lines.get(idx).map(LineBox::end_x).unwrap_or(0.0);
        (idx, x)
    }
}

struct LineBuilder {
    start: usize,
    x: f32,
    content_x: f32,
    stops: Vec<(usize, f32)>,
}

impl LineBuilder {
    fn new(start: usize, x: f32) -> Self {
        Self {
            start,
            x,
            content_x: x,
            stops: Vec::new(),
        }
    }

    fn has_content(&self) -> bool {
        !self.stops.is_empty()
    }
}

struct Breaker<'a, M: TextMeasurer> {
    measurer: &'a M,
    style: &'a ComputedStyle,
    avail: f32,
    wraps: bool,
    line_height: f32,
    lines: Vec<LineBox>,
    current: LineBuilder,
}

impl<M: TextMeasurer> Breaker<'_, M> {
    /// Close the current line at byte `end`; the next one starts at
    /// `next_start`.
    fn finish_line(&mut self, end: usize, next_start: usize) {
        let done = std::mem::replace(&mut self.current, LineBuilder::new(next_start, 0.0));
        let width = done.content_x;
        let top = self.lines.len() as f32 * self.line_height;
        self.lines.push(LineBox {
            range: done.start..end,
            top,
            height: self.line_height,
            width,
            align_offset: align_offset(self.style, self.avail, width),
            stops: done.stops,
            end_x: done.x,
        });
    }

    fn overflows(&self, right: f32) -> bool {
        self.wraps && right > self.avail
    }

    fn space(&mut self, at: usize) {
        let w = self.measurer.measure(" ", self.style) + self.style.letter_spacing + self.style.word_spacing;
        self.current.stops.push((at, self.current.x));
        self.current.x += w;
    }

    fn tab(&mut self, at: usize) {
        let interval = match self.style.tab_size {
            TabSize::Spaces(n) => {
                n * (self.measurer.measure(" ", self.style) + self.style.letter_spacing + self.style.word_spacing)
            }
            TabSize::Px(px) => px,
        };
        self.current.stops.push((at, self.current.x));
        if interval > 0.0 {
            self.current.x = ((self.current.x / interval).floor() + 1.0) * interval;
        }
        self.current.content_x = self.current.x;
    }

    fn word(&mut self, text: &str, range: Range<usize>) {
        let chars: Vec<(usize, char)> = text[range.clone()]
            .char_indices()
            .map(|(i, c)| (range.start + i, c))
            .collect();

        // prefix[i] = advance of the first i characters, transformed.
        let mut shaped = String::new();
        let mut prefix = Vec::with_capacity(chars.len() + 1);
        prefix.push(0.0);
        for (i, &(_, ch)) in chars.iter().enumerate() {
            push_transformed(&mut shaped, ch, i == 0, self.style.text_transform);
            prefix.push(self.measurer.measure(&shaped, self.style) + self.style.letter_spacing * (i + 1) as f32);
        }
        let total = prefix[chars.len()];

        if self.current.has_content() && self.overflows(self.current.x + total) {
            self.finish_line(range.start, range.start);
        }

        let break_word = self.style.word_wrap != OverflowWrap::Normal;
        let mut origin = 0;
        let mut seg_x = self.current.x;
        for (i, &(at, _)) in chars.iter().enumerate() {
            let right = seg_x + prefix[i + 1] - prefix[origin];
            if break_word && self.current.has_content() && self.overflows(right) {
                self.finish_line(at, at);
                origin = i;
                seg_x = self.current.x;
            }
            let x = seg_x + prefix[i] - prefix[origin];
            self.current.stops.push((at, x));
        }
        self.current.x = seg_x + total - prefix[origin];
        self.current.content_x = self.current.x;
    }
}

fn push_transformed(out: &mut String, ch: char, word_start: bool, transform: TextTransform) {
    match transform {
        TextTransform::None => out.push(ch),
        TextTransform::Uppercase => out.extend(ch.to_uppercase()),
        TextTransform::Lowercase => out.extend(ch.to_lowercase()),
        TextTransform::Capitalize if word_start => out.extend(ch.to_uppercase()),
        TextTransform::Capitalize => out.push(ch),
    }
}

fn align_offset(style: &ComputedStyle, avail: f32, width: f32) -> f32 {
    if !avail.is_finite() {
        return 0.0;
    }
    let rtl = style.direction.is_rtl();
    let factor = match style.text_align {
        TextAlign::Left => 0.0,
        TextAlign::Right => 1.0,
        TextAlign::Center => 0.5,
        TextAlign::Start | TextAlign::Justify => {
            if rtl {
                1.0
            } else {
                0.0
            }
        }
        TextAlign::End => {
            if rtl {
                0.0
            } else {
                1.0
            }
        }
    };
    ((avail - width) * factor).max(0.0)
}

/// Lay out `text` the way a block with `style` would, assuming preserved
/// white space.
///
/// Wrapping happens only when `white-space` allows it and the block has a
/// definite width. Words move to the next line as a whole; with
/// `overflow-wrap: break-word` a word wider than the line is split between
/// characters.
pub fn layout_text<M: TextMeasurer>(measurer: &M, text: &str, style: &ComputedStyle) -> TextLayout {
    let line_height = style
        .line_height
        .resolve(style.font_px(), || measurer.line_height(style));
    let avail = style.content_width().unwrap_or(f32::INFINITY);

    let mut breaker = Breaker {
        measurer,
        style,
        avail,
        wraps: style.white_space.wraps() && avail.is_finite(),
        line_height,
        lines: Vec::new(),
        current: LineBuilder::new(0, style.text_indent),
    };

    for token in tokenize(text) {
        match token {
            Token::Word(r) => breaker.word(text, r),
            Token::Space(r) => breaker.space(r.start),
            Token::Tab(r) => breaker.tab(r.start),
            Token::HardBreak(r) => {
                // The break itself sits at the end of its line.
                let x = breaker.current.x;
                breaker.current.stops.push((r.start, x));
                breaker.finish_line(r.start, r.end);
            }
        }
    }
    breaker.finish_line(text.len(), text.len());

    TextLayout {
        lines: breaker.lines,
        line_height,
    }
}
