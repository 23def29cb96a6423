//! Ephemeral in-memory executor
//!
//! One call opens one `:memory:` connection, applies the schema, runs the
//! query and drops the connection. Nothing is shared between calls, so a
//! single [`Sandbox`] can be used from any number of threads at once.

use crate::cancel::CancelToken;
use crate::error::{query_error, SandboxError, SandboxResult};
use crate::outcome::{json_value, QueryOutcome, Row};
use crate::policy;
use rusqlite::limits::Limit;
use rusqlite::Connection;
use sqlforge_config::SandboxConfig;
use tracing::{debug, info};

/// VM instructions between cancellation checks
const PROGRESS_INTERVAL: i32 = 1000;

/// Executor for schema-plus-query requests
#[derive(Debug, Clone, Default)]
pub struct Sandbox {
    config: SandboxConfig,
}

impl Sandbox {
    /// Create an executor with the given configuration
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Build `schema` in a fresh instance and run `query` against it.
    ///
    /// `schema` must already be in SQLite syntax. The instance is discarded
    /// before this returns, whatever the outcome.
    pub fn execute(&self, schema: &str, query: &str) -> SandboxResult<QueryOutcome> {
        self.execute_cancellable(schema, query, &CancelToken::new())
    }

    /// [`Sandbox::execute`], stopped with [`SandboxError::Interrupted`] once
    /// `cancel` fires, whether during the build or the query.
    pub fn execute_cancellable(
        &self,
        schema: &str,
        query: &str,
        cancel: &CancelToken,
    ) -> SandboxResult<QueryOutcome> {
        // The progress handler only fires on long statements
        if cancel.is_cancelled() {
            return Err(SandboxError::Interrupted);
        }

        let conn = self.open()?;
        watch(&conn, cancel)?;

        let outcome = self
            .apply_schema(&conn, schema)
            .and_then(|()| run_query(&conn, query))
            .map_err(|e| {
                if cancel.is_cancelled() {
                    debug!(error = %e, "Execution cancelled");
                    SandboxError::Interrupted
                } else {
                    e
                }
            })?;

        info!(
            columns = outcome.columns().len(),
            rows = outcome.rows().len(),
            rows_affected = ?outcome.rows_affected(),
            "Sandbox query complete"
        );
        Ok(outcome)
    }

    /// Open a fresh in-memory instance with attachments disabled.
    pub fn open(&self) -> SandboxResult<Connection> {
        let conn =
            Connection::open_in_memory().map_err(|e| SandboxError::Connection(e.to_string()))?;

        // Zero attached databases keeps ATTACH and VACUUM INTO off the filesystem
        conn.set_limit(Limit::SQLITE_LIMIT_ATTACHED, 0)
            .map_err(|e| SandboxError::Connection(e.to_string()))?;

        if self.config.foreign_keys {
            conn.execute_batch("PRAGMA foreign_keys = ON;")
                .map_err(|e| SandboxError::Connection(e.to_string()))?;
        }

        Ok(conn)
    }

    /// SQLite version reported by a freshly opened instance
    pub fn engine_version(&self) -> SandboxResult<String> {
        self.open()?
            .query_row("SELECT sqlite_version()", [], |row| row.get(0))
            .map_err(|e| SandboxError::Connection(e.to_string()))
    }

    /// Open a fresh instance and apply a canonical schema script to it.
    pub fn build(&self, schema: &str) -> SandboxResult<Connection> {
        let conn = self.open()?;
        self.apply_schema(&conn, schema)?;
        Ok(conn)
    }

    /// Apply a canonical schema script statement by statement.
    ///
    /// Failures matching [`policy::is_tolerated_build_failure`] are skipped;
    /// any other failure aborts the build.
    pub fn apply_schema(&self, conn: &Connection, schema: &str) -> SandboxResult<()> {
        let mut applied = 0usize;
        let mut skipped = 0usize;

        for statement in policy::schema_statements(schema) {
            match conn.execute_batch(statement) {
                Ok(()) => applied += 1,
                Err(e) => {
                    let reason = e.to_string();
                    if policy::is_tolerated_build_failure(&reason) {
                        debug!(%reason, "Skipping schema statement");
                        skipped += 1;
                        continue;
                    }
                    return Err(SandboxError::SchemaBuild {
                        statement: policy::statement_preview(
                            statement,
                            self.config.statement_preview_len,
                        ),
                        reason,
                    });
                }
            }
        }

        debug!(applied, skipped, "Schema built");
        Ok(())
    }
}

fn watch(conn: &Connection, cancel: &CancelToken) -> SandboxResult<()> {
    let cancel = cancel.clone();
    conn.progress_handler(PROGRESS_INTERVAL, Some(move || cancel.is_cancelled()))
        .map_err(|e| SandboxError::Connection(e.to_string()))
}

fn run_query(conn: &Connection, query: &str) -> SandboxResult<QueryOutcome> {
    let query = policy::normalize_query(query);
    if query.is_empty() {
        return Err(SandboxError::Query("Query is empty".to_string()));
    }

    let mut stmt = conn.prepare(query).map_err(query_error)?;

    // Anything that yields columns is read as rows, e.g. PRAGMA or WITH
    if policy::is_read_query(query) || stmt.column_count() > 0 {
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([]).map_err(query_error)?;
        while let Some(row) = cursor.next().map_err(query_error)? {
            let mut record = Row::with_capacity(columns.len());
            for (i, name) in columns.iter().enumerate() {
                let value = row.get_ref(i).map_err(query_error)?;
                record.insert(name.clone(), json_value(value));
            }
            rows.push(record);
        }

        Ok(QueryOutcome::Rows { columns, rows })
    } else {
        let rows_affected = stmt.execute([]).map_err(query_error)?;
        Ok(QueryOutcome::mutation(rows_affected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    const USERS: &str = "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);\
                         INSERT INTO users(name) VALUES ('ada');\
                         INSERT INTO users(name) VALUES ('grace')";

    fn sandbox() -> Sandbox {
        Sandbox::default()
    }

    #[test]
    fn test_select_preserves_order() {
        let outcome = sandbox()
            .execute(USERS, "SELECT name, id FROM users ORDER BY id")
            .unwrap();

        assert_eq!(outcome.columns(), ["name", "id"]);
        assert_eq!(
            outcome.results_json(),
            json!([{"name": "ada", "id": 1}, {"name": "grace", "id": 2}])
        );
    }

    #[test]
    fn test_write_reports_rows_affected() {
        let outcome = sandbox()
            .execute(USERS, "UPDATE users SET name = upper(name);")
            .unwrap();

        assert!(outcome.columns().is_empty());
        assert_eq!(outcome.rows_affected(), Some(2));
    }

    #[test]
    fn test_pragma_is_read_as_rows() {
        let outcome = sandbox()
            .execute(USERS, "PRAGMA table_info(users)")
            .unwrap();

        assert!(outcome.columns().contains(&"name".to_string()));
        assert_eq!(outcome.rows().len(), 2);
    }

    #[traced_test]
    #[test]
    fn test_already_exists_is_skipped() {
        let schema = "CREATE TABLE t (a INTEGER);CREATE TABLE t (a INTEGER);INSERT INTO t VALUES (1)";
        let outcome = sandbox().execute(schema, "SELECT count(*) AS n FROM t").unwrap();

        assert_eq!(outcome.results_json(), json!([{"n": 1}]));
        assert!(logs_contain("Skipping schema statement"));
    }

    #[test]
    fn test_schema_failure_stops_build() {
        let err = sandbox()
            .execute("CREATE TABLE a (x INTEGER);CREAT TABLE b (y INTEGER)", "SELECT 1")
            .unwrap_err();

        match err {
            SandboxError::SchemaBuild { statement, reason } => {
                assert_eq!(statement, "CREAT TABLE b (y INTEGER)");
                assert!(reason.contains("syntax error"), "{reason}");
            }
            other => panic!("expected schema build error, got {other:?}"),
        }
    }

    #[test]
    fn test_schema_failure_preview_is_truncated() {
        let sandbox = Sandbox::new(SandboxConfig {
            statement_preview_len: 10,
            ..SandboxConfig::default()
        });
        let err = sandbox
            .execute("INSERT INTO missing VALUES (1, 2, 3, 4, 5)", "SELECT 1")
            .unwrap_err();

        assert!(matches!(
            err,
            SandboxError::SchemaBuild { ref statement, .. } if statement == "INSERT INT"
        ));
    }

    #[test]
    fn test_attach_is_blocked() {
        let err = sandbox()
            .execute("", "ATTACH DATABASE ':memory:' AS other")
            .unwrap_err();

        assert!(matches!(err, SandboxError::Query(_)));
    }

    #[test]
    fn test_vacuum_into_file_is_blocked() {
        let dir = std::env::temp_dir().join("sqlforge-vacuum-into.db");
        let query = format!("VACUUM INTO '{}'", dir.display());

        let err = sandbox().execute(USERS, &query).unwrap_err();
        assert!(matches!(err, SandboxError::Query(_)), "{err:?}");
        assert!(!dir.exists());
    }

    #[test]
    fn test_open_applies_attach_limit() {
        let conn = sandbox().open().unwrap();
        assert_eq!(conn.limit(Limit::SQLITE_LIMIT_ATTACHED).unwrap(), 0);
    }

    #[test]
    fn test_cancel_stops_unbounded_query() {
        let sandbox = sandbox();
        let token = CancelToken::new();
        let endless = "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c) SELECT x FROM c";

        let err = std::thread::scope(|scope| {
            let handle = scope.spawn(|| sandbox.execute_cancellable("", endless, &token));
            std::thread::sleep(std::time::Duration::from_millis(200));
            token.cancel();
            handle.join().unwrap()
        })
        .unwrap_err();

        assert_eq!(err, SandboxError::Interrupted);
    }

    #[test]
    fn test_cancel_stops_long_schema_build() {
        let sandbox = sandbox();
        let token = CancelToken::new();
        let schema = "CREATE TABLE n (x INTEGER);\
                      INSERT INTO n WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c) SELECT x FROM c";

        let err = std::thread::scope(|scope| {
            let handle = scope.spawn(|| sandbox.execute_cancellable(schema, "SELECT 1", &token));
            std::thread::sleep(std::time::Duration::from_millis(200));
            token.cancel();
            handle.join().unwrap()
        })
        .unwrap_err();

        assert_eq!(err, SandboxError::Interrupted);
    }

    #[test]
    fn test_cancelled_token_skips_execution() {
        let token = CancelToken::new();
        token.cancel();

        let err = sandbox()
            .execute_cancellable("CREATE TABLE t (a INTEGER)", "SELECT 1", &token)
            .unwrap_err();
        assert_eq!(err, SandboxError::Interrupted);
    }

    #[test]
    fn test_empty_query() {
        let err = sandbox().execute(USERS, "  ;  ").unwrap_err();
        assert_eq!(err, SandboxError::Query("Query is empty".to_string()));
    }

    #[test]
    fn test_foreign_keys_toggle() {
        let schema = "CREATE TABLE p (id INTEGER PRIMARY KEY);\
                      CREATE TABLE c (pid INTEGER REFERENCES p(id))";
        let insert = "INSERT INTO c VALUES (42)";

        assert!(sandbox().execute(schema, insert).is_ok());

        let strict = Sandbox::new(SandboxConfig {
            foreign_keys: true,
            ..SandboxConfig::default()
        });
        assert!(matches!(
            strict.execute(schema, insert),
            Err(SandboxError::Query(_))
        ));
    }

    #[test]
    fn test_engine_version() {
        let version = sandbox().engine_version().unwrap();
        assert!(version.starts_with("3."), "{version}");
    }

    #[test]
    fn test_build_returns_populated_instance() {
        let conn = sandbox().build(USERS).unwrap();
        let count: i64 = conn
            .query_row("SELECT count(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let sandbox = sandbox();
        sandbox
            .execute("CREATE TABLE t (a INTEGER)", "INSERT INTO t VALUES (1)")
            .unwrap();

        let outcome = sandbox
            .execute("CREATE TABLE t (a INTEGER)", "SELECT * FROM t")
            .unwrap();
        assert!(outcome.rows().is_empty());
    }
}
