//! Environment file codec.
//!
//! Parses loosely written `.env` text into an [`EnvMapping`] and serializes
//! mappings back into canonical text: keys sorted byte-wise, one `KEY=VALUE`
//! line each, values quoted only when they have to be.
//!
//! Canonical text is a fixed point: `serialize(parse(t)) == t` whenever `t`
//! came out of [`serialize`], and `parse(serialize(m)) == m` for any mapping.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use zeroize::Zeroize;

use crate::core::validation;
use crate::error::{EnvError, ParseError, ParseReason, Result};

/// Characters that force a value into double quotes.
const QUOTE_TRIGGERS: &[char] = &[' ', '=', '#', '\n', '\t'];

/// A parsed environment file: variable names mapped to values, ordered by name.
///
/// Names are validated on insertion. Values are wiped from memory on drop and
/// never shown by `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvMapping {
    entries: BTreeMap<String, String>,
}

impl EnvMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from key-value pairs. Later duplicates win.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid variable name.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut mapping = Self::new();
        for (key, value) in pairs {
            mapping.insert(key, value)?;
        }
        Ok(mapping)
    }

    /// Insert a value, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `key` is not a valid variable name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Option<String>> {
        let key = key.into();
        validation::validate_key(&key)?;
        Ok(self.entries.insert(key, value.into()))
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for EnvMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.keys().map(|k| (k, "<redacted>")))
            .finish()
    }
}

impl Drop for EnvMapping {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}

/// Shown in place of a value in error messages.
const REDACTED: &str = "<redacted>";

/// A raw line reduced to its variable name, for error messages.
///
/// Everything after `=`, and anything after the first word of the name part,
/// is replaced with [`REDACTED`]: `TOKEN="abc` becomes `TOKEN=<redacted>`.
fn redact_line(raw: &str) -> String {
    let line = raw.trim();
    let line = line
        .strip_prefix("export")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
        .unwrap_or(line);

    let (target, value) = match line.split_once('=') {
        Some((target, value)) => (target.trim_end(), Some(value)),
        None => (line, None),
    };

    let mut shown = match target.split_once(char::is_whitespace) {
        Some((name, _)) => format!("{} {}", name, REDACTED),
        None => target.to_string(),
    };
    if let Some(value) = value {
        shown.push('=');
        if !value.trim().is_empty() {
            shown.push_str(REDACTED);
        }
    }
    shown
}

/// Tokenizer state. One character is consumed per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    LineStart,
    Comment,
    Key,
    AfterKey,
    ValueStart,
    Unquoted,
    Double,
    DoubleEscape,
    Single,
    AfterQuote,
}

struct Tokenizer<'a> {
    lines: Vec<&'a str>,
    state: State,
    line: usize,
    entry_line: usize,
    key: String,
    value: String,
    mapping: EnvMapping,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            state: State::LineStart,
            line: 1,
            entry_line: 1,
            key: String::new(),
            value: String::new(),
            mapping: EnvMapping::new(),
        }
    }

    fn error(&self, line: usize, reason: ParseReason) -> ParseError {
        let content = self
            .lines
            .get(self.entry_line - 1)
            .map(|l| redact_line(l))
            .unwrap_or_default();
        ParseError {
            line,
            content,
            reason,
        }
    }

    fn begin_value(&mut self) -> std::result::Result<State, ParseError> {
        if !validation::is_valid_key(&self.key) {
            return Err(self.error(self.entry_line, ParseReason::InvalidKey));
        }
        Ok(State::ValueStart)
    }

    fn commit(&mut self, trim: bool) {
        let key = std::mem::take(&mut self.key);
        let mut value = std::mem::take(&mut self.value);
        if trim {
            let len = value.trim_end().len();
            value.truncate(len);
        }
        if self.mapping.entries.insert(key, value).is_some() {
            debug!(line = self.entry_line, "duplicate key, last assignment wins");
        }
    }

    fn step(&mut self, ch: char) -> std::result::Result<(), ParseError> {
        use State::*;

        let next = match (self.state, ch) {
            (LineStart, '\n') => LineStart,
            (LineStart, '#') => Comment,
            (LineStart, '=') => {
                self.entry_line = self.line;
                self.begin_value()?
            }
            (LineStart, c) if c.is_whitespace() => LineStart,
            (LineStart, c) => {
                self.entry_line = self.line;
                self.key.push(c);
                Key
            }

            (Comment, '\n') => LineStart,
            (Comment, _) => Comment,

            (Key, '=') => self.begin_value()?,
            (Key, '\n') => return Err(self.error(self.entry_line, ParseReason::MissingEquals)),
            (Key, c) if c.is_whitespace() => AfterKey,
            (Key, c) => {
                self.key.push(c);
                Key
            }

            (AfterKey, '=') => self.begin_value()?,
            (AfterKey, '\n') => return Err(self.error(self.entry_line, ParseReason::MissingEquals)),
            (AfterKey, c) if c.is_whitespace() => AfterKey,
            (AfterKey, c) if self.key == "export" => {
                self.key.clear();
                self.key.push(c);
                Key
            }
            (AfterKey, _) => return Err(self.error(self.entry_line, ParseReason::MissingEquals)),

            (ValueStart, ' ' | '\t') => ValueStart,
            (ValueStart, '"') => Double,
            (ValueStart, '\'') => Single,
            (ValueStart, '\n') => {
                self.commit(false);
                LineStart
            }
            (ValueStart, c) => {
                self.value.push(c);
                Unquoted
            }

            (Unquoted, '\n') => {
                self.commit(true);
                LineStart
            }
            (Unquoted, c) => {
                self.value.push(c);
                Unquoted
            }

            (Double, '\\') => DoubleEscape,
            (Double, '"') => {
                self.commit(false);
                AfterQuote
            }
            (Double, c) => {
                self.value.push(c);
                Double
            }

            (DoubleEscape, c @ ('"' | '\\')) => {
                self.value.push(c);
                Double
            }
            (DoubleEscape, c) => {
                self.value.push('\\');
                self.value.push(c);
                Double
            }

            (Single, '\'') => {
                self.commit(false);
                AfterQuote
            }
            (Single, c) => {
                self.value.push(c);
                Single
            }

            (AfterQuote, '\n') => LineStart,
            (AfterQuote, '#') => Comment,
            (AfterQuote, c) if c.is_whitespace() => AfterQuote,
            (AfterQuote, _) => return Err(self.error(self.line, ParseReason::TrailingCharacters)),
        };

        if ch == '\n' {
            self.line += 1;
        }
        self.state = next;
        Ok(())
    }

    fn finish(mut self) -> std::result::Result<EnvMapping, ParseError> {
        match self.state {
            State::LineStart | State::Comment | State::AfterQuote => {}
            State::Key | State::AfterKey => {
                return Err(self.error(self.entry_line, ParseReason::MissingEquals))
            }
            State::ValueStart => self.commit(false),
            State::Unquoted => self.commit(true),
            State::Double | State::DoubleEscape | State::Single => {
                return Err(self.error(self.entry_line, ParseReason::UnterminatedQuote))
            }
        }
        Ok(std::mem::take(&mut self.mapping))
    }
}

/// Parse `.env` text into a mapping.
///
/// - Blank lines and `#` comment lines are skipped; an `export ` prefix is accepted.
/// - Double-quoted values unescape `\"` and `\\`; other backslashes are kept as written.
/// - Single-quoted values are taken verbatim. Both quote styles may span lines.
/// - Unquoted values run to the end of the line with trailing whitespace trimmed.
///
/// # Errors
///
/// Returns `ParseError` for the first line that is not a valid assignment.
pub fn parse(text: &str) -> std::result::Result<EnvMapping, ParseError> {
    let mut tokenizer = Tokenizer::new(text);
    for ch in text.chars() {
        tokenizer.step(ch)?;
    }
    tokenizer.finish()
}

/// Whether a value must be wrapped in double quotes.
///
/// Values containing a space, `=`, `#`, newline or tab are quoted. So are
/// values that would otherwise read back differently: a leading quote
/// character, leading or trailing whitespace, or a carriage return. The empty
/// string is never quoted.
pub fn needs_quotes(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    value.contains(QUOTE_TRIGGERS)
        || value.contains('\r')
        || value.starts_with(&['"', '\''][..])
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
}

/// Escape a value for use between double quotes (`"` → `\"`, `\` → `\\`).
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(ch),
        }
    }

    escaped
}

/// Serialize a mapping to canonical text.
///
/// Keys come out in ascending byte order and the output ends with exactly one
/// newline. An empty mapping serializes to the empty string.
pub fn serialize(mapping: &EnvMapping) -> String {
    let mut output = String::new();

    for (key, value) in mapping.iter() {
        output.push_str(key);
        output.push('=');
        if needs_quotes(value) {
            output.push('"');
            output.push_str(&escape_value(value));
            output.push('"');
        } else {
            output.push_str(value);
        }
        output.push('\n');
    }

    output
}

/// Load and parse an env file from disk.
///
/// # Errors
///
/// Returns `EnvError::NotFound` if the file does not exist, `EnvError::Parse`
/// if it is malformed, or `EnvError::Read` for other read failures.
pub fn load(path: impl AsRef<Path>) -> Result<EnvMapping> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading env file");

    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            EnvError::NotFound(path.to_path_buf())
        } else {
            EnvError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mapping = parse(&contents).map_err(|source| EnvError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), keys = mapping.len(), "env file parsed");
    Ok(mapping)
}

/// Load an env file and return its canonical text.
///
/// # Errors
///
/// Same as [`load`].
pub fn normalize(path: impl AsRef<Path>) -> Result<String> {
    load(path).map(|mapping| serialize(&mapping))
}

/// Write a mapping to disk in canonical form.
///
/// The text goes to a temporary file next to `path` which is synced and then
/// renamed over the target, so an interrupted write never leaves a truncated
/// file behind. Parent directories are created. On Unix the file is `0600`.
///
/// # Errors
///
/// Returns `EnvError::Write` if any filesystem step fails.
pub fn write(path: impl AsRef<Path>, mapping: &EnvMapping) -> Result<()> {
    let path = path.as_ref();
    let failed = |source| EnvError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(failed)?;

    let mut content = serialize(mapping);
    let mut file = NamedTempFile::new_in(parent).map_err(failed)?;
    let written = file
        .write_all(content.as_bytes())
        .and_then(|_| file.as_file().sync_all());
    content.zeroize();
    written.map_err(failed)?;

    file.persist(path).map_err(|e| failed(e.error))?;

    debug!(path = %path.display(), keys = mapping.len(), "env file written");
    Ok(())
}

/// Write canonical text to a fresh temporary file.
///
/// This is the hand-off to the external encryption tool, which reads the
/// plaintext from [`NamedTempFile::path`]. The file is removed when dropped.
///
/// # Errors
///
/// Returns `Error::Io` if the temporary file cannot be created or written.
pub fn stage(mapping: &EnvMapping) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("envseal-")
        .suffix(".env")
        .tempfile()?;

    let mut content = serialize(mapping);
    let written = file
        .write_all(content.as_bytes())
        .and_then(|_| file.flush());
    content.zeroize();
    written?;

    Ok(file)
}
