//! MySQL to SQLite schema translation.
//!
//! A sequence of regex rewrite rules over plain text, not a parser. Each
//! rule is a pure function in [`rules`] or [`table`], so coverage gaps are
//! easy to spot and extend. Translation never fails: whatever the rules do
//! not understand is passed through and surfaces later as an execution
//! error from the engine.
//!
//! ## Usage
//!
//! ```rust
//! use sqlforge_dialect::translate;
//!
//! let canonical = translate(
//!     "CREATE TABLE `t` (`id` int(11) NOT NULL AUTO_INCREMENT, PRIMARY KEY (`id`)) ENGINE=InnoDB;",
//! );
//! assert_eq!(canonical, "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT)");
//! ```

pub mod rules;
pub mod table;
mod translator;

pub use translator::{translate, DialectTranslator, MysqlToSqlite};
