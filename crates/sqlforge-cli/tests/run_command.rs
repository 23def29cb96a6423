//! `run` command against schema files on disk.

use serde_json::json;
use sqlforge_cli::commands::run::{render, run};
use sqlforge_config::SqlforgeConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn schema_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn runs_query_against_translated_mysql_schema() {
    let file = schema_file(
        "CREATE TABLE `t` (\n  `id` int(11) NOT NULL AUTO_INCREMENT,\n  `name` varchar(50),\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB;\nINSERT INTO `t` (`name`) VALUES ('a');\n",
    );

    let outcome = run(SqlforgeConfig::default(), file.path(), "SELECT * FROM t", false).unwrap();

    assert_eq!(
        render(&outcome),
        json!({"success": true, "columns": ["id", "name"], "results": [{"id": 1, "name": "a"}]})
    );
}

#[test]
fn no_translate_runs_schema_verbatim() {
    // Backticks are valid SQLite quoting, so the untranslated script still builds
    let file = schema_file("CREATE TABLE `t` (a INTEGER); INSERT INTO `t` VALUES (5);");

    let outcome = run(SqlforgeConfig::default(), file.path(), "SELECT a FROM t", true).unwrap();
    assert_eq!(outcome.results_json(), json!([{"a": 5}]));
}

#[test]
fn schema_errors_surface_as_errors() {
    let file = schema_file("CREAT TABLE t (a int);");

    let err = run(SqlforgeConfig::default(), file.path(), "SELECT 1", false).unwrap_err();
    assert!(err.to_string().starts_with("Error executing schema:"), "{err}");
}

#[test]
fn missing_schema_file_is_reported() {
    let err = run(
        SqlforgeConfig::default(),
        std::path::Path::new("/nonexistent/schema.sql"),
        "SELECT 1",
        false,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to read schema file"));
}
