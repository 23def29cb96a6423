//! Build and query classification rules
//!
//! Each decision the executor makes from text lives here as one predicate.

/// Whether a schema statement failure may be skipped.
///
/// Only "already exists" failures are tolerated, so scripts that create the
/// same object twice still build.
pub fn is_tolerated_build_failure(reason: &str) -> bool {
    reason.to_lowercase().contains("already exists")
}

/// Whether a query reads rows: starts with `SELECT`, ignoring case and
/// leading whitespace.
pub fn is_read_query(query: &str) -> bool {
    query
        .trim_start()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("select"))
}

/// Trim a query and drop trailing statement terminators.
pub fn normalize_query(query: &str) -> &str {
    query.trim().trim_end_matches(';').trim_end()
}

/// First `max_chars` characters of a statement, for error messages.
pub fn statement_preview(statement: &str, max_chars: usize) -> String {
    statement.chars().take(max_chars).collect()
}

/// Split a canonical script into its non-empty statements, in order.
pub fn schema_statements(schema: &str) -> impl Iterator<Item = &str> {
    schema.split(';').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("table t already exists", true ; "table")]
    #[test_case("index idx_name already exists", true ; "index")]
    #[test_case("Table T ALREADY EXISTS", true ; "mixed case")]
    #[test_case("near \"CREAT\": syntax error", false ; "syntax error")]
    #[test_case("no such table: users", false ; "missing table")]
    #[test_case("UNIQUE constraint failed: t.id", false ; "constraint")]
    fn test_is_tolerated_build_failure(reason: &str, expected: bool) {
        assert_eq!(is_tolerated_build_failure(reason), expected);
    }

    #[test_case("SELECT * FROM t", true ; "upper")]
    #[test_case("  select 1", true ; "leading whitespace")]
    #[test_case("\n\tSeLeCt 1", true ; "mixed case")]
    #[test_case("INSERT INTO t VALUES (1)", false ; "insert")]
    #[test_case("WITH x AS (SELECT 1) SELECT * FROM x", false ; "cte is not syntactically a read")]
    #[test_case("SEL", false ; "too short")]
    #[test_case("", false ; "empty")]
    fn test_is_read_query(query: &str, expected: bool) {
        assert_eq!(is_read_query(query), expected);
    }

    #[test]
    fn test_is_read_query_multibyte_prefix() {
        assert!(!is_read_query("é SELECT"));
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  SELECT 1;; \n"), "SELECT 1");
        assert_eq!(normalize_query("SELECT ';'"), "SELECT ';'");
    }

    #[test]
    fn test_statement_preview_is_char_safe() {
        assert_eq!(statement_preview("héllo world", 5), "héllo");
        assert_eq!(statement_preview("short", 100), "short");
    }

    #[test]
    fn test_schema_statements() {
        let statements: Vec<_> = schema_statements("CREATE TABLE a (x);; CREATE TABLE b (y) ;").collect();
        assert_eq!(statements, vec!["CREATE TABLE a (x)", "CREATE TABLE b (y)"]);
    }
}
