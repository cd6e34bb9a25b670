//! Headless prompt field with trigger-character autocomplete.
//!
//! Each stdin line either replaces the field text (`|` marks the caret) or
//! is a command: `:up`, `:down`, `:enter`, `:tab`, `:esc`, `:click`,
//! `:reload`, `:quit`.

mod host;

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use autocomplete::{FieldRegistry, Key, Settings, SharedSettings};
use caret::{CaretLocator, CaretOptions};
use clap::Parser;
use input_core::{FieldId, FieldKind, MemoryField, TextField};
use layout::{FixedAdvanceMeasurer, TextLayoutBackend};
use net::HttpWordSource;
use words::{DirectorySource, WordCache, WordSource};

use host::Command;

const FIELD: FieldId = FieldId::from_raw(1);

#[derive(Parser)]
#[command(name = "snippets")]
#[command(about = "Prompt snippet autocomplete on a headless text field")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Fetch the dictionary from this URL instead of local directories
    #[arg(long, conflicts_with_all = ["data_dir", "user_dir"])]
    words_url: Option<String>,

    /// Timeout in seconds for the dictionary request
    #[arg(long, default_value_t = 10, requires = "words_url")]
    fetch_timeout: u64,

    /// Directory of default word files; may be repeated
    #[arg(long)]
    data_dir: Vec<PathBuf>,

    /// Base directory for user word files (seeded with examples on first use)
    #[arg(long)]
    user_dir: Option<PathBuf>,

    /// Zoom factor of the canvas hosting the field
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Inline style of the field, e.g. "width: 300px; font-size: 14px"
    #[arg(long, default_value = "width: 400px; font-size: 13px; line-height: 1.2")]
    style: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let level = if settings.debug_output { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = SharedSettings::new(settings);
    let words = Arc::new(WordCache::new(word_source(&cli)?));
    words.preload_in_background();

    let locator = CaretLocator::new(TextLayoutBackend::new(FixedAdvanceMeasurer::default()))
        .with_options(CaretOptions {
            debug: settings.debug_output(),
        });
    let scale = cli.scale;
    let mut registry = FieldRegistry::new(locator, Arc::clone(&words), settings.clone())
        .with_scale(Rc::new(move || scale));
    registry.attach(FIELD, FieldKind::MultiLine);

    let style = css::compute_style(&css::parse_declarations(&cli.style));
    let mut field = MemoryField::new(FieldKind::MultiLine).with_style(style);
    field.focus();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "error: {err}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let Some(controller) = registry.get_mut(FIELD) else {
            break;
        };
        match command {
            Command::Edit { text, caret } => {
                field.set_value(text);
                field.set_caret(caret);
                controller.key_up(Key::Other, &field)?;
            }
            Command::Key(key) => {
                controller.key_down(key, &mut field);
                controller.key_up(key, &field)?;
                // the host applies edits synchronously
                controller.on_mutation_visible(&field)?;
            }
            Command::Click => controller.on_click(),
            Command::Reload => {
                if let Err(err) = words.reload() {
                    writeln!(stdout, "error: {err}")?;
                }
                controller.on_text_changed(&field)?;
            }
            Command::Quit => {}
        }
        controller.poll_deferred(Instant::now(), &field)?;

        let trigger = settings.trigger_character();
        write!(stdout, "{}", host::render(&field, controller, trigger))?;
        stdout.flush()?;
    }
    Ok(())
}

fn word_source(cli: &Cli) -> Result<Box<dyn WordSource>, Box<dyn Error>> {
    if let Some(url) = &cli.words_url {
        let source = HttpWordSource::new(url.clone())
            .with_timeout(Duration::from_secs(cli.fetch_timeout));
        return Ok(Box::new(source));
    }
    let mut dirs = cli.data_dir.clone();
    if let Some(base) = &cli.user_dir {
        dirs.push(DirectorySource::prepare_user_dir(base)?);
    }
    if dirs.is_empty() {
        log::warn!("no word directories given; the dictionary is empty");
    }
    Ok(Box::new(DirectorySource::new(dirs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fetch_timeout_needs_a_words_url() {
        let cli = Cli::try_parse_from(["snippets", "--words-url", "http://host/w", "--fetch-timeout", "3"])
            .unwrap();
        assert_eq!(cli.fetch_timeout, 3);
        assert!(Cli::try_parse_from(["snippets", "--fetch-timeout", "3"]).is_err());
        assert_eq!(Cli::try_parse_from(["snippets"]).unwrap().fetch_timeout, 10);
    }
}
