pub mod clock;
pub mod collection;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod forms;
pub mod inspiration;
pub mod models;
pub mod state;
pub mod stats;
pub mod store;
pub mod streak;
#[cfg(test)]
mod test_utils;
pub mod validation;

pub use crate::config::Config;
pub use crate::dashboard::Dashboard;
pub use crate::error::{AppError, InitError};

use crate::db::Database;
use crate::store::{KeyValueStore, SqliteStore};
use log::{error, info};
use std::rc::Rc;

/// Open the on-disk store described by `config` and load the dashboard.
pub fn open_dashboard(config: &Config) -> Result<Dashboard, InitError> {
    let db_path = config.db_path().map_err(|e| {
        error!("Dreamboard initialization failed: {e}");
        e
    })?;

    let db = Database::open(&db_path).map_err(|e| {
        error!("Failed to open database: {e}");
        InitError::DatabaseOpen(e)
    })?;
    info!("Opened store at {}", db_path.display());

    let store = SqliteStore::new(db).map_err(|e| {
        error!("Failed to run migrations: {e}");
        InitError::Migration(e)
    })?;

    let store: Rc<dyn KeyValueStore> = Rc::new(store);
    Ok(Dashboard::open(&store, Box::new(config.clock())))
}
