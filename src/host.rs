//! Line-oriented driver for one in-memory prompt field.

use std::fmt::Write as _;

use autocomplete::{AutocompleteController, Key, extract_query};
use caret::{HorizontalAnchor, MeasurementBackend};
use input_core::{MemoryField, TextField};

/// Marks the caret in edited lines and in the echoed field.
pub const CARET_MARK: char = '|';

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the field text; the caret goes to the byte offset given.
    Edit { text: String, caret: usize },
    Key(Key),
    Click,
    Reload,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let key = match line.trim_end() {
            ":up" => Key::ArrowUp,
            ":down" => Key::ArrowDown,
            ":enter" => Key::Enter,
            ":tab" => Key::Tab,
            ":esc" => Key::Escape,
            ":click" => return Ok(Command::Click),
            ":reload" => return Ok(Command::Reload),
            ":quit" | ":q" => return Ok(Command::Quit),
            cmd if cmd.starts_with(':') => return Err(format!("unknown command {cmd}")),
            _ => return Ok(Self::edit(line)),
        };
        Ok(Command::Key(key))
    }

    fn edit(line: &str) -> Self {
        match line.find(CARET_MARK) {
            Some(caret) => {
                let mut text = String::with_capacity(line.len());
                text.push_str(&line[..caret]);
                text.push_str(&line[caret + CARET_MARK.len_utf8()..]);
                Command::Edit { text, caret }
            }
            None => Command::Edit {
                text: line.to_string(),
                caret: line.len(),
            },
        }
    }
}

/// Describe the field and the dropdown after a step.
pub fn render<B: MeasurementBackend>(
    field: &MemoryField,
    controller: &AutocompleteController<B>,
    trigger: char,
) -> String {
    let mut out = String::new();
    let value = field.value();
    let caret = field.selection_start();
    let _ = writeln!(out, "field: {}{CARET_MARK}{}", &value[..caret], &value[caret..]);

    match extract_query(value, caret, trigger) {
        Some(query) => {
            let _ = writeln!(out, "query: {query:?}");
        }
        None => out.push_str("query: none\n"),
    }

    let dropdown = controller.dropdown();
    if !dropdown.is_open() {
        out.push_str("dropdown: closed\n");
        return out;
    }

    if let Some(p) = dropdown.placement() {
        let side = match p.horizontal {
            HorizontalAnchor::Left(x) => format!("left={x:.1}"),
            HorizontalAnchor::Right(x) => format!("right={x:.1}"),
        };
        let _ = writeln!(out, "dropdown: top={:.1} {side} max-height={:.1}", p.top, p.max_height);
    }

    for (i, row) in dropdown.rows().iter().enumerate() {
        let mark = if Some(i) == dropdown.selected_index() { '>' } else { ' ' };
        let key = match row.segments() {
            Some(s) => format!("{}[{}]{}", s.before, s.matched, s.after),
            None => row.suggestion.key.clone(),
        };
        let _ = writeln!(out, "{mark} {key}");
        if Some(i) == dropdown.selected_index() {
            if let Some(preview) = dropdown.preview() {
                let _ = writeln!(out, "    {preview}");
            }
        }
    }
    out
}
