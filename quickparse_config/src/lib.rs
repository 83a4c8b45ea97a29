mod schema;

pub use schema::{CONFIG_FILE, Config};
