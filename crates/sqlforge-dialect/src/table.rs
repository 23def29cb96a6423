//! `CREATE TABLE` rewrite rules.
//!
//! These run on one statement at a time, before the script-wide rules in
//! [`crate::rules`].

use crate::rules::remove_dangling_commas;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use tracing::debug;

static CREATE_TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^CREATE\s+(?:TEMPORARY\s+)?TABLE\b").unwrap());

/// Table options that may follow the closing parenthesis, in any order
static TRAILING_OPTION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s*\bENGINE\s*=\s*\w+",
        r"(?i)\s*\b(?:DEFAULT\s+)?(?:CHARSET\s*=\s*|CHARACTER\s+SET\s*=?\s*)\w+",
        r"(?i)\s*\b(?:DEFAULT\s+)?COLLATE\b\s*=?\s*\w+",
        r"(?i)\s*\bAUTO_INCREMENT\s*=\s*\d+",
        r"(?i)\s*\bROW_FORMAT\s*=\s*\w+",
        r"(?i)\s*\bCOMMENT\s*=?\s*'(?:[^'\\]|\\.|'')*'",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// An integer column followed by attribute tokens in any order.
///
/// Group 1 is the column name, group 2 the attribute run.
static INTEGER_COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\w+)\s+(?:tiny|small|medium|big)?int(?:eger)?(?:\s*\(\s*\d+\s*\))?((?:\s+(?:unsigned|not\s+null|auto_increment|primary\s+key)\b)+)",
    )
    .unwrap()
});

static AUTO_INCREMENT_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bauto_increment\b").unwrap());

static PRIMARY_KEY_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bprimary\s+key\b").unwrap());

/// Whether a statement defines a table
pub fn is_create_table(statement: &str) -> bool {
    CREATE_TABLE_RE.is_match(statement.trim_start())
}

/// Remove MySQL table options after the column list's closing parenthesis.
///
/// Only text after the last `)` is touched, so column-level directives are
/// left for the script-wide fallback.
pub fn strip_trailing_table_options(statement: &str) -> String {
    let Some(close) = statement.rfind(')') else {
        return statement.to_string();
    };

    let (definition, options) = statement.split_at(close + 1);
    let options = TRAILING_OPTION_RES
        .iter()
        .fold(options.to_string(), |acc, re| re.replace_all(&acc, "").into_owned());

    format!("{definition}{options}")
}

/// Fold an auto-increment column and its primary key into SQLite's
/// `INTEGER PRIMARY KEY AUTOINCREMENT`.
///
/// The first integer column carrying `AUTO_INCREMENT` is the candidate. It
/// is folded when a table-level `[CONSTRAINT name] PRIMARY KEY (col)` names
/// exactly that column (the constraint is then removed) or when the column
/// already declares `PRIMARY KEY` inline. Otherwise the statement is
/// returned unchanged and the bare attribute is dropped later.
pub fn fold_auto_increment_key(statement: &str) -> String {
    let Some(caps) = INTEGER_COLUMN_RE
        .captures_iter(statement)
        .find(|caps| AUTO_INCREMENT_ATTR_RE.is_match(&caps[2]))
    else {
        return statement.to_string();
    };

    let column = &caps[1];
    let inline_key = PRIMARY_KEY_ATTR_RE.is_match(&caps[2]);

    let constraint_re = match Regex::new(&format!(
        r"(?i)(?:CONSTRAINT\s+\w+\s+)?PRIMARY\s+KEY\s*\(\s*{}\s*\)\s*,?\s*",
        regex::escape(column)
    )) {
        Ok(re) => re,
        Err(e) => {
            debug!(column, error = %e, "Could not build primary key pattern");
            return statement.to_string();
        }
    };
    let table_key = constraint_re.is_match(statement);

    if !inline_key && !table_key {
        debug!(
            column,
            "Auto-increment column has no single-column primary key, leaving it unfolded"
        );
        return statement.to_string();
    }

    let Some(whole) = caps.get(0) else {
        return statement.to_string();
    };
    let folded = format!(
        "{}{column} INTEGER PRIMARY KEY AUTOINCREMENT{}",
        &statement[..whole.start()],
        &statement[whole.end()..]
    );

    debug!(column, inline_key, "Folded auto-increment primary key");

    if table_key {
        remove_dangling_commas(&constraint_re.replace_all(&folded, NoExpand("")))
    } else {
        folded
    }
}

/// Apply every table rule to a statement that defines a table.
pub fn normalize_create_table(statement: &str) -> String {
    fold_auto_increment_key(&strip_trailing_table_options(statement))
}
