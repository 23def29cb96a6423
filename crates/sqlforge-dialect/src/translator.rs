//! Translation pipeline.

use crate::rules;
use crate::table;
use tracing::debug;

/// A text-to-text dialect translator.
///
/// Implementations must be total: malformed input is passed through as far
/// as it can be normalized, never rejected.
pub trait DialectTranslator: Send + Sync {
    /// Short name for logs, e.g. `mysql->sqlite`
    fn name(&self) -> &'static str;

    /// Rewrite `script` into the target dialect
    fn translate(&self, script: &str) -> String;
}

/// MySQL DDL to SQLite DDL.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlToSqlite;

impl DialectTranslator for MysqlToSqlite {
    fn name(&self) -> &'static str {
        "mysql->sqlite"
    }

    fn translate(&self, script: &str) -> String {
        let script = rules::strip_identifier_quotes(script);
        let script = rules::strip_comments(&script);

        let statements: Vec<String> = rules::split_statements(&script)
            .into_iter()
            .map(|statement| {
                if table::is_create_table(&statement) {
                    table::normalize_create_table(&statement)
                } else {
                    statement
                }
            })
            .collect();
        let count = statements.len();
        let script = statements.join("; ");

        // Seeds and storage options go before lone AUTO_INCREMENT attributes
        let script = rules::normalize_integer_types(&script);
        let script = rules::strip_table_options(&script);
        let script = rules::strip_auto_increment(&script);
        let script = rules::cleanup_punctuation(&script);

        debug!(translator = self.name(), statements = count, "Translated schema script");
        script
    }
}

/// Translate a MySQL schema script into SQLite syntax.
pub fn translate(script: &str) -> String {
    MysqlToSqlite.translate(script)
}
