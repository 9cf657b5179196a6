//! Fixture files: reading, normalization, and the path convention.
//!
//! A case path `X` has its actual output under `test/X` and its fixture
//! under `test/expected/X`. Files discovered inside an expected tree carry
//! the `expected` segment themselves and are mapped back with
//! [`actual_path_from_expected`].

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostics::{FixtureError, Result};

/// Directory, relative to the harness root, holding actual outputs.
pub const TEST_DIR: &str = "test";
/// Directory, relative to [`TEST_DIR`], mirroring it with fixtures.
pub const EXPECTED_DIR: &str = "expected";

const BOM: char = '\u{feff}';

// ECMAScript `\s`: WhiteSpace plus LineTerminator. Unlike Unicode
// White_Space this excludes U+0085 (NEL) and includes U+FEFF.
static WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]",
    )
    .expect("whitespace pattern is valid")
});

/// Reads a fixture's raw bytes.
pub fn read_fixture_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes fixture bytes as text, dropping a single leading byte-order mark.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected, so files that
/// are byte-identical always decode to equal text.
pub fn decode_fixture(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

/// Reads a fixture as text. See [`decode_fixture`].
pub fn read_fixture(path: &Path) -> Result<String> {
    read_fixture_bytes(path).map(|bytes| decode_fixture(&bytes))
}

/// Overwrites a fixture with new content, creating parent directories.
pub fn write_fixture(path: &Path, content: &[u8]) -> Result<()> {
    let write_err = |source| FixtureError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, content).map_err(write_err)
}

/// Removes every whitespace character.
pub fn strip_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, "").into_owned()
}

/// Applies [`strip_whitespace`] when `ignore_whitespace` is set.
pub fn normalize(text: String, ignore_whitespace: bool) -> String {
    if ignore_whitespace {
        strip_whitespace(&text)
    } else {
        text
    }
}

/// `test/<case_path>`
pub fn actual_path_for(case_path: &str) -> PathBuf {
    Path::new(TEST_DIR).join(case_path)
}

/// `test/expected/<case_path>`
pub fn expected_path_for(case_path: &str) -> PathBuf {
    expected_root().join(case_path)
}

/// `test/expected`
pub fn expected_root() -> PathBuf {
    Path::new(TEST_DIR).join(EXPECTED_DIR)
}

/// Maps an expected-file path to the actual output it mirrors.
///
/// Removes the first `\expected`, then the first `/expected`, then turns the
/// first `.expected.` into `.`. Each rewrite happens at most once.
pub fn actual_path_from_expected(expected: &str) -> String {
    expected
        .replacen("\\expected", "", 1)
        .replacen("/expected", "", 1)
        .replacen(".expected.", ".", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_directory_fixture_to_actual() {
        assert_eq!(
            actual_path_from_expected("test/expected/es6/out.js"),
            "test/es6/out.js"
        );
    }

    #[test]
    fn maps_windows_separators() {
        assert_eq!(
            actual_path_from_expected("test\\expected\\es6\\out.js"),
            "test\\es6\\out.js"
        );
    }

    #[test]
    fn maps_sibling_expected_file() {
        assert_eq!(
            actual_path_from_expected("test/html/foo.expected.html.ts"),
            "test/html/foo.html.ts"
        );
    }

    #[test]
    fn each_rewrite_applies_once() {
        assert_eq!(
            actual_path_from_expected("test/expected/a/expected/b.expected.expected.js"),
            "test/a/expected/b.expected.js"
        );
    }

    #[test]
    fn path_without_markers_is_unchanged() {
        assert_eq!(actual_path_from_expected("test/a/b.js"), "test/a/b.js");
    }

    #[test]
    fn strips_js_whitespace_and_bom() {
        assert_eq!(
            strip_whitespace("a b\tc\r\nd\u{00a0}e\u{2028}f\u{feff}g"),
            "abcdefg"
        );
    }

    #[test]
    fn keeps_characters_outside_the_js_whitespace_class() {
        assert_eq!(strip_whitespace("a\u{85}b"), "a\u{85}b");
        assert_eq!(strip_whitespace("a\u{200b}b"), "a\u{200b}b");
        assert_eq!(strip_whitespace("a\u{0b}\u{0c}\u{3000}\u{205f}b"), "ab");
    }

    #[test]
    fn identical_invalid_utf8_decodes_equal() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = b"var s = '\xff\xfe caf\xe9';\n";
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        fs::write(&a, bytes).unwrap();
        fs::write(&b, bytes).unwrap();
        let text = read_fixture(&a).unwrap();
        assert_eq!(text, read_fixture(&b).unwrap());
        assert!(text.contains('\u{fffd}'));
    }

    #[test]
    fn normalize_is_identity_when_disabled() {
        assert_eq!(normalize(" a ".to_string(), false), " a ");
        assert_eq!(normalize(" a ".to_string(), true), "a");
    }

    #[test]
    fn case_paths_follow_convention() {
        assert_eq!(
            actual_path_for("simple/js/zoo.js"),
            Path::new("test").join("simple/js/zoo.js")
        );
        assert_eq!(
            expected_path_for("simple/js/zoo.js"),
            Path::new("test").join("expected").join("simple/js/zoo.js")
        );
    }

    #[test]
    fn read_drops_leading_bom_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}x\u{feff}").unwrap();
        assert_eq!(read_fixture(&path).unwrap(), "x\u{feff}");
    }

    #[test]
    fn read_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_fixture(&dir.path().join("nope.js")).unwrap_err();
        assert!(matches!(err, FixtureError::Read { .. }));
    }
}
