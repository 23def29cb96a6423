//! Script-wide rewrite rules.
//!
//! Rules here see the whole script (or one line of it) and know nothing
//! about statement boundaries. Table-definition rules live in
//! [`crate::table`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `int(11)`, `bigint(20)`, `integer(10)`: integer types with a display width
static SIZED_INTEGER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:tiny|small|medium|big)?int(?:eger)?\s*\(\s*\d+\s*\)").unwrap()
});

/// Bare `int`. `\b` already rules out the `INTEGER` spelling.
static BARE_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bint\b").unwrap());

static LONE_AUTO_INCREMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+AUTO_INCREMENT\b").unwrap());

static AUTO_INCREMENT_SEED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*\bAUTO_INCREMENT\s*=\s*\d+").unwrap());

/// `ENGINE=` naming a MySQL storage engine. Restricting the value keeps
/// `SET engine = 2` in seed data intact.
static ENGINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s*\bENGINE\s*=\s*(?:InnoDB|MyISAM|MEMORY|HEAP|CSV|ARCHIVE|Aria|BLACKHOLE|FEDERATED|MERGE|MRG_MyISAM|NDB|NDBCLUSTER|RocksDB|TokuDB|Spider|ColumnStore)\b",
    )
    .unwrap()
});

/// Character set names start with a letter, so numeric assignments never match
static CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s*\b(?:DEFAULT\s+)?(?:CHARSET\s*=\s*|CHARACTER\s+SET\s*=?\s*)[a-z]\w*",
    )
    .unwrap()
});

static COLLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*\b(?:DEFAULT\s+)?COLLATE\b\s*=?\s*([a-z]\w*)").unwrap()
});

static INTEGER_QUALIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:UNSIGNED|ZEROFILL)\b").unwrap());

static REPEATED_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",(?:\s*,)+").unwrap());

static DANGLING_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*\)").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static TERMINATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*;\s*").unwrap());

/// Collations SQLite understands natively
const SQLITE_COLLATIONS: [&str; 3] = ["BINARY", "NOCASE", "RTRIM"];

/// Remove every backtick identifier quote.
pub fn strip_identifier_quotes(script: &str) -> String {
    script.replace('`', "")
}

/// Drop comment and blank lines and join the rest with single spaces.
///
/// Removes `--` and `#` comment lines, single-line `/* ... */` comments
/// (including MySQL's `/*!40101 ... */;` version comments) and trailing `--`
/// comments after code.
pub fn strip_comments(script: &str) -> String {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !is_comment_line(line))
        .map(|line| strip_trailing_comment(line).trim_end())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_comment_line(line: &str) -> bool {
    if line.is_empty() || line.starts_with("--") || line.starts_with('#') {
        return true;
    }
    line.starts_with("/*") && line.trim_end_matches(';').trim_end().ends_with("*/")
}

/// Cut a `--` comment that follows code, ignoring `--` inside quoted literals.
fn strip_trailing_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            // MySQL escapes quotes inside literals with a backslash
            Some(_) if escaped => escaped = false,
            Some(_) if b == b'\\' => escaped = true,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'\'' || b == b'"' => quote = Some(b),
            None if b == b'-' && bytes.get(i + 1) == Some(&b'-') => return &line[..i],
            None => {}
        }
    }
    line
}

/// Split on `;` into trimmed, non-empty statements, in source order.
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rewrite width-qualified integer types and bare `int` to `INTEGER`.
pub fn normalize_integer_types(script: &str) -> String {
    let script = SIZED_INTEGER_RE.replace_all(script, "INTEGER");
    BARE_INT_RE.replace_all(&script, "INTEGER").into_owned()
}

/// Delete lone `AUTO_INCREMENT` attributes that were not folded into a key.
///
/// The folded `AUTOINCREMENT` spelling is left alone.
pub fn strip_auto_increment(script: &str) -> String {
    LONE_AUTO_INCREMENT_RE.replace_all(script, "").into_owned()
}

/// Remove MySQL storage directives wherever they appear.
///
/// Covers `AUTO_INCREMENT=n` seeds, `ENGINE=`, character sets, non-SQLite
/// collations and the `UNSIGNED`/`ZEROFILL` qualifiers. Seeds go first so a
/// later [`strip_auto_increment`] never sees `AUTO_INCREMENT=n`.
pub fn strip_table_options(script: &str) -> String {
    let script = AUTO_INCREMENT_SEED_RE.replace_all(script, "");
    let script = ENGINE_RE.replace_all(&script, "");
    let script = CHARSET_RE.replace_all(&script, "");
    let script = strip_foreign_collations(&script);
    INTEGER_QUALIFIER_RE.replace_all(&script, "").into_owned()
}

fn strip_foreign_collations(script: &str) -> String {
    COLLATE_RE
        .replace_all(script, |caps: &Captures| {
            let name = caps[1].to_ascii_uppercase();
            if SQLITE_COLLATIONS.contains(&name.as_str()) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Remove a comma left directly before a closing parenthesis.
pub fn remove_dangling_commas(script: &str) -> String {
    DANGLING_COMMA_RE.replace_all(script, ")").into_owned()
}

/// Collapse doubled commas and whitespace runs, and tighten `;` separators.
pub fn cleanup_punctuation(script: &str) -> String {
    let script = REPEATED_COMMA_RE.replace_all(script, ",");
    let script = remove_dangling_commas(&script);
    let script = WHITESPACE_RE.replace_all(&script, " ");
    let script = TERMINATOR_RE.replace_all(&script, ";");
    script.trim().to_string()
}
