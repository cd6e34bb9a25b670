use std::ops::Range;

/// A run of the surface text between break opportunities.
///
/// Ranges are byte ranges into the source text. Preserved white space only:
/// nothing collapses, and `\u{A0}` is part of a word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    Word(Range<usize>),
    /// A single preserved space; hangs at the end of a line.
    Space(Range<usize>),
    Tab(Range<usize>),
    /// `\n`, `\r` or `\r\n`.
    HardBreak(Range<usize>),
}

pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    fn flush(word_start: &mut Option<usize>, end: usize, tokens: &mut Vec<Token>) {
        if let Some(start) = word_start.take()
            && start < end
        {
            tokens.push(Token::Word(start..end));
        }
    }

    let mut it = text.char_indices().peekable();
    while let Some((idx, ch)) = it.next() {
        match ch {
            '\n' => {
                flush(&mut word_start, idx, &mut tokens);
                tokens.push(Token::HardBreak(idx..idx + 1));
            }
            '\r' => {
                flush(&mut word_start, idx, &mut tokens);
                let mut end = idx + 1;
                if let Some((next_idx, '\n')) = it.peek().copied() {
                    let _ = it.next();
                    end = next_idx + 1;
                }
                tokens.push(Token::HardBreak(idx..end));
            }
            ' ' => {
                flush(&mut word_start, idx, &mut tokens);
                tokens.push(Token::Space(idx..idx + 1));
            }
            '\t' => {
                flush(&mut word_start, idx, &mut tokens);
                tokens.push(Token::Tab(idx..idx + 1));
            }
            _ => {
                if word_start.is_none() {
                    word_start = Some(idx);
                }
            }
        }
    }
    flush(&mut word_start, text.len(), &mut tokens);

    tokens
}
