use anyhow::{Context, Result};
use sqlforge_dialect::translate;
use std::path::Path;

pub fn execute(schema_file: &Path) -> Result<()> {
    let script = std::fs::read_to_string(schema_file)
        .with_context(|| format!("Failed to read schema file {}", schema_file.display()))?;

    let output = format_statements(&translate(&script));
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// One terminated statement per line
pub fn format_statements(canonical: &str) -> String {
    canonical
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{s};"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_statements() {
        assert_eq!(
            format_statements("CREATE TABLE a (x INTEGER);INSERT INTO a VALUES (1)"),
            "CREATE TABLE a (x INTEGER);\nINSERT INTO a VALUES (1);"
        );
        assert_eq!(format_statements(""), "");
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = execute(Path::new("/nonexistent/schema.sql")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/schema.sql"));
    }
}
