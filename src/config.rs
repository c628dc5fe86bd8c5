use crate::clock::{DayBoundary, SystemClock};
use crate::constants::DB_FILE_NAME;
use crate::error::InitError;
use directories::ProjectDirs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directory holding the database. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub day_boundary: DayBoundary,
}

impl Config {
    /// Resolve the database path, creating the data directory if needed.
    pub fn db_path(&self) -> Result<PathBuf, InitError> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => ProjectDirs::from("com", "dreamboard", "Dreamboard")
                .ok_or(InitError::NoProjectDirs)?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir).map_err(InitError::DataDirCreation)?;
        Ok(data_dir.join(DB_FILE_NAME))
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock::new(self.day_boundary)
    }
}
