//! Environment file persistence
//!
//! One entry per line, `"<key>":"<value>"`, both fields quoted as described
//! in [`crate::env::quoted`]. Lines starting with `//` and empty lines are
//! skipped. Loading and saving are best-effort: failures are logged, never
//! returned.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::core::error::{CratchitError, Result};
use crate::env::quoted::{quote, unquote};

/// Value stored against a key
pub type EnvironmentValue = String;

/// Key-value table, ordered by key so serialization is deterministic
pub type Environment = BTreeMap<String, EnvironmentValue>;

/// Lines starting with this are comments
pub const COMMENT_MARKER: &str = "//";

const SEPARATOR: char = ':';

/// Entries present in every freshly opened store
pub const SEED_ENTRIES: [(&str, &str); 2] = [("Test Entry", "Test Value"), ("Test2", "4711")];

/// Whether `line` should be parsed as an entry
pub fn is_value_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with(COMMENT_MARKER)
}

/// Format one entry as a line, without a line terminator
pub fn format_entry(key: &str, value: &str) -> String {
    format!("{}{}{}", quote(key), SEPARATOR, quote(value))
}

/// Parse a value line. `line_no` is 1-based and only used in the error.
pub fn parse_entry(line: &str, line_no: usize) -> Result<(String, EnvironmentValue)> {
    let (key, rest) = unquote(line).map_err(|reason| CratchitError::malformed(line_no, reason))?;
    let rest = rest
        .strip_prefix(SEPARATOR)
        .ok_or_else(|| CratchitError::malformed(line_no, "expected ':' after key"))?;
    let (value, rest) =
        unquote(rest).map_err(|reason| CratchitError::malformed(line_no, reason))?;
    if !rest.is_empty() {
        return Err(CratchitError::malformed(line_no, "trailing text after value"));
    }
    Ok((key, value))
}

/// Serialize every entry, newline separated, no trailing newline
pub fn serialize(environment: &Environment) -> String {
    environment
        .iter()
        .map(|(key, value)| format_entry(key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read entries from `reader` into `environment`.
///
/// Keys already present are kept. Returns how many value lines were skipped
/// as malformed, including lines that are not valid UTF-8. Stops at the first
/// read error; entries read before it stay.
pub fn read_entries<R: BufRead>(
    mut reader: R,
    environment: &mut Environment,
) -> io::Result<usize> {
    let mut skipped = 0;
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.strip_suffix('\n').unwrap_or(line),
            Err(_) => {
                let e = CratchitError::malformed(line_no, "not valid UTF-8");
                warn!("Skipping environment line: {}", e);
                skipped += 1;
                continue;
            }
        };
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !is_value_line(line) {
            continue;
        }
        match parse_entry(line, line_no) {
            Ok((key, value)) => {
                environment.entry(key).or_insert(value);
            }
            Err(e) => {
                warn!("Skipping environment line: {}", e);
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}

/// Read the file at `path` into `environment`.
///
/// Failing to open the file is reported as [`CratchitError::Io`] so callers
/// can tell a missing file apart; failures after that carry the path.
pub fn read_environment(path: &Path, environment: &mut Environment) -> Result<usize> {
    let file = File::open(path)?;
    read_entries(BufReader::new(file), environment).map_err(|e| {
        CratchitError::with_context(format!("Failed to read {}", path.display()), e)
    })
}

/// Overwrite `path` with the serialized environment
pub fn write_environment(path: &Path, environment: &Environment) -> Result<()> {
    for key in environment
        .iter()
        .filter(|(k, v)| has_line_break(k) || has_line_break(v))
        .map(|(k, _)| k)
    {
        warn!("Entry {:?} contains a line break and will not read back intact", key);
    }

    let write = || -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(serialize(environment).as_bytes())?;
        out.flush()
    };
    write().map_err(|e| {
        CratchitError::with_context(format!("Failed to write {}", path.display()), e)
    })
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// Load entries from `path` into `environment`, logging instead of failing.
///
/// A missing file is not an error.
pub fn load_into(path: &Path, environment: &mut Environment) {
    match read_environment(path, environment) {
        Ok(0) => debug!("Loaded environment from {}", path.display()),
        Ok(skipped) => warn!(
            "Loaded environment from {} ({} malformed line(s) skipped)",
            path.display(),
            skipped
        ),
        Err(CratchitError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No environment file at {}", path.display())
        }
        Err(e) => error!("Environment not loaded: {}", e),
    }
}

/// Load the environment stored at `path`
pub fn load(path: &Path) -> Environment {
    let mut environment = Environment::new();
    load_into(path, &mut environment);
    environment
}

/// Save `environment` to `path`, logging on failure
pub fn save(path: &Path, environment: &Environment) {
    match write_environment(path, environment) {
        Ok(()) => debug!(
            "Saved {} environment entries to {}",
            environment.len(),
            path.display()
        ),
        Err(e) => error!("Environment not saved: {}", e),
    }
}

/// Environment bound to its backing file.
///
/// Opening loads the file on top of the seed entries. The environment is
/// written back exactly once, by [`EnvironmentStore::close`] or, if the store
/// goes out of scope without being closed, when it is dropped.
#[derive(Debug)]
pub struct EnvironmentStore {
    path: PathBuf,
    environment: Environment,
    closed: bool,
}

impl EnvironmentStore {
    /// Open the store backed by `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut environment: Environment = SEED_ENTRIES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_into(&path, &mut environment);
        Self {
            path,
            environment,
            closed: false,
        }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&EnvironmentValue> {
        self.environment.get(key)
    }

    /// Set `key`, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<EnvironmentValue>,
    ) -> Option<EnvironmentValue> {
        self.environment.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<EnvironmentValue> {
        self.environment.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EnvironmentValue)> {
        self.environment.iter()
    }

    pub fn len(&self) -> usize {
        self.environment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environment.is_empty()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Mutable access for command handlers
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// Write the environment back and release the store
    pub fn close(mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        if !self.closed {
            save(&self.path, &self.environment);
            self.closed = true;
        }
    }
}

impl Drop for EnvironmentStore {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn env_of(entries: &[(&str, &str)]) -> Environment {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_is_value_line() {
        assert!(!is_value_line(""));
        assert!(!is_value_line("// comment"));
        assert!(!is_value_line("//"));
        assert!(is_value_line("/ not a comment"));
        assert!(is_value_line(r#""a":"b""#));
    }

    #[test]
    fn test_parse_entry() {
        let (k, v) = parse_entry(r#""Test2":"4711""#, 1).unwrap();
        assert_eq!((k.as_str(), v.as_str()), ("Test2", "4711"));
    }

    #[test]
    fn test_parse_entry_rejects_whitespace_around_colon() {
        assert!(parse_entry(r#""a" :"b""#, 1).is_err());
        assert!(parse_entry(r#""a": "b""#, 1).is_err());
        assert!(parse_entry(r#""a":"b" x"#, 1).is_err());
        assert!(parse_entry(r#"a:"b""#, 1).is_err());
    }

    #[test]
    fn test_read_entries_skips_comments_and_malformed() {
        let text = "// header\n\n\"a\":\"1\"\nnot an entry\n\"b\":\"2\"\r\n";
        let mut env = Environment::new();
        let skipped = read_entries(Cursor::new(text), &mut env).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(env, env_of(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let bytes = b"\"a\":\"1\"\n\"\xF6l\":\"2\"\n\"b\":\"2\"\n\"c\":\"3\"\n".to_vec();
        let mut env = Environment::new();
        let skipped = read_entries(Cursor::new(bytes), &mut env).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(env, env_of(&[("a", "1"), ("b", "2"), ("c", "3")]));
    }

    #[test]
    fn test_store_keeps_entries_after_invalid_utf8_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratchit.env");
        std::fs::write(&path, b"\"a\":\"1\"\n\"K\xF6p\":\"x\"\n\"b\":\"2\"\n\"c\":\"3\"").unwrap();

        let store = EnvironmentStore::open(&path);
        assert_eq!(store.get("b").map(String::as_str), Some("2"));
        assert_eq!(store.get("c").map(String::as_str), Some("3"));
        store.close();

        let reopened = EnvironmentStore::open(&path);
        assert_eq!(reopened.len(), 5);
    }

    #[test]
    fn test_write_failure_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("cratchit.env");
        let err = write_environment(&path, &env_of(&[("a", "1")])).unwrap_err();
        assert!(matches!(err, CratchitError::WithContext { .. }));
        assert!(err.to_string().contains("missing-dir"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut env = env_of(&[("a", "seed")]);
        read_entries(Cursor::new("\"a\":\"file\"\n\"b\":\"1\"\n\"b\":\"2\""), &mut env).unwrap();
        assert_eq!(env, env_of(&[("a", "seed"), ("b", "1")]));
    }

    #[test]
    fn test_serialize_sorted_without_trailing_newline() {
        let env = env_of(&[("b", "2"), ("a", r#"say "x""#)]);
        assert_eq!(serialize(&env), "\"a\":\"say \\\"x\\\"\"\n\"b\":\"2\"");
        assert_eq!(serialize(&Environment::new()), "");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratchit.env");
        let env = env_of(&[
            ("Test Entry", "Test Value"),
            ("path", r"C:\books\2024"),
            ("quote", r#"he said "hej""#),
            ("k=v;x", "a:b,c."),
            ("empty", ""),
            ("//not a comment", "value"),
        ]);
        save(&path, &env);
        assert_eq!(load(&path), env);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.env")).is_empty());
    }

    #[test]
    fn test_save_to_unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("cratchit.env");
        save(&path, &env_of(&[("a", "1")]));
        assert!(!path.exists());
    }

    #[test]
    fn test_store_seeds_and_persists_on_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratchit.env");

        let mut store = EnvironmentStore::open(&path);
        assert_eq!(store.get("Test Entry").map(String::as_str), Some("Test Value"));
        assert_eq!(store.get("Test2").map(String::as_str), Some("4711"));
        assert_eq!(store.len(), 2);
        store.insert("company", "ITfied AB");
        store.close();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "\"Test Entry\":\"Test Value\"\n\"Test2\":\"4711\"\n\"company\":\"ITfied AB\""
        );
    }

    #[test]
    fn test_store_persists_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratchit.env");
        {
            let mut store = EnvironmentStore::open(&path);
            store.insert("x", "1");
        }
        let reopened = EnvironmentStore::open(&path);
        assert_eq!(reopened.get("x").map(String::as_str), Some("1"));
        assert_eq!(reopened.len(), 3);
    }

    #[test]
    fn test_store_file_does_not_override_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratchit.env");
        std::fs::write(&path, "\"Test2\":\"42\"\n\"other\":\"v\"").unwrap();

        let store = EnvironmentStore::open(&path);
        assert_eq!(store.get("Test2").map(String::as_str), Some("4711"));
        assert_eq!(store.get("other").map(String::as_str), Some("v"));
    }
}
