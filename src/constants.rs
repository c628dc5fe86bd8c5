// src/constants.rs

/// Storage key holding the serialized dream collection
pub const DREAMS_KEY: &str = "dreams";

/// Storage key holding the serialized goal collection
pub const GOALS_KEY: &str = "goals";

/// Storage key holding the serialized habit collection
pub const HABITS_KEY: &str = "habits";

/// Database file name inside the data directory
pub const DB_FILE_NAME: &str = "dreamboard.db";

/// Maximum size of one stored value in bytes (5 MiB)
pub const MAX_VALUE_BYTES: usize = 5 * 1024 * 1024;

/// Upper bound of goal progress (percent)
pub const MAX_PROGRESS: u8 = 100;
