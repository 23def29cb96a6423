mod generate;
mod health;
mod sql;

pub use generate::generate_routes;
pub use health::health_routes;
pub use sql::sql_routes;
