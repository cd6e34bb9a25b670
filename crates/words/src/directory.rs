use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{Category, Dictionary, SourceError, WordData, WordSource};

/// Name of the per-user data directory created under the user's base
/// directory.
pub const USER_DIR_NAME: &str = "comfyui-prompt-snippets";

const EXAMPLE_SUFFIX: &str = ".example";

const GADGET_EXAMPLE: &str = "headphones\ncellphone\nflashlight\n";
const CHARA_EXAMPLE_KEY: &str = "victory-kun";
const CHARA_EXAMPLE_VALUE: &str = "(1boy:1.85), adult, white hair, green eyes, victory pose, white sneakers, :D, dutch angle, solo, detailed background";

/// Reads every data file of a list of directories.
///
/// - each regular file is a category named after its file stem
/// - `*.json` holds an object of key to expansion, or an array of words
/// - `*.csv` holds one word per non-empty line
/// - `*.example` files are inert templates and are skipped
///
/// Directories are read in order and later ones override earlier ones, so
/// user data goes last.
#[derive(Clone, Debug, Default)]
pub struct DirectorySource {
    dirs: Vec<PathBuf>,
}

impl DirectorySource {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn load(&self) -> Result<WordData, SourceError> {
        let mut words = Dictionary::new();
        let mut categories = BTreeSet::new();

        for dir in &self.dirs {
            if !dir.is_dir() {
                log::debug!(target: "words", "skipping missing data dir {}", dir.display());
                continue;
            }
            load_dir(dir, &mut words, &mut categories)?;
        }

        log::info!(
            target: "words",
            "loaded {} categories from {} dirs",
            categories.len(),
            self.dirs.len()
        );

        Ok(WordData {
            words,
            categories: categories.into_iter().collect(),
        })
    }

    /// Create `<base>/comfyui-prompt-snippets` and return its path.
    ///
    /// A freshly created directory is seeded with two example files showing
    /// both formats; they are skipped by the loader until renamed.
    pub fn prepare_user_dir(base: &Path) -> Result<PathBuf, SourceError> {
        fs::create_dir_all(base).map_err(|e| SourceError::io(base, e))?;

        let dir = base.join(USER_DIR_NAME);
        let is_new = !dir.exists();
        fs::create_dir_all(&dir).map_err(|e| SourceError::io(&dir, e))?;

        if is_new {
            let gadget = dir.join("gadget.csv.example");
            fs::write(&gadget, GADGET_EXAMPLE).map_err(|e| SourceError::io(&gadget, e))?;

            let chara = dir.join("custom_chara.json.example");
            fs::write(&chara, chara_example()?).map_err(|e| SourceError::io(&chara, e))?;

            log::info!(target: "words", "created user data dir {}", dir.display());
        }

        Ok(dir)
    }
}

impl WordSource for DirectorySource {
    fn fetch(&self) -> Result<WordData, SourceError> {
        self.load()
    }
}

fn chara_example() -> Result<Vec<u8>, SourceError> {
    let mut doc = indexmap::IndexMap::new();
    doc.insert(CHARA_EXAMPLE_KEY, CHARA_EXAMPLE_VALUE);

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    doc.serialize(&mut ser)?;
    Ok(out)
}

fn load_dir(
    dir: &Path,
    words: &mut Dictionary,
    categories: &mut BTreeSet<String>,
) -> Result<(), SourceError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SourceError::io(dir, e))? {
        let entry = entry.map_err(|e| SourceError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    for path in files {
        let Some(name) = category_name(&path) else {
            continue;
        };
        categories.insert(name.to_string());

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                let text = read(&path)?;
                match serde_json::from_str::<Category>(&text) {
                    Ok(category) => {
                        words.insert(name, category);
                    }
                    Err(err) => {
                        log::error!(target: "words", "error decoding JSON from {}: {err}", path.display());
                    }
                }
            }
            Some("csv") => {
                let text = read(&path)?;
                words.insert(name, Category::Csv(csv_items(&text)));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Category for a data file, `None` for files the loader ignores.
fn category_name(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    if file_name.starts_with('.') || file_name.ends_with(EXAMPLE_SUFFIX) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.ends_with(EXAMPLE_SUFFIX) {
        return None;
    }
    Some(stem)
}

fn csv_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn read(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|e: io::Error| SourceError::io(path, e))
}
