pub mod notify;
pub mod portfolio;
pub mod server;
pub mod store;

use std::env::var_os;
use std::path::PathBuf;

pub fn database_path_from_env() -> PathBuf {
    var_os("DATABASE_PATH").map_or_else(|| "contacts.db".into(), Into::into)
}

pub fn portfolio_path_from_env() -> Option<PathBuf> {
    var_os("PORTFOLIO_PATH").map(Into::into)
}
