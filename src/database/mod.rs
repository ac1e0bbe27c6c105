// Preference persistence
// SQLite connection, versioned migrations and the key-value preference stores.

pub mod connection;
pub mod migrations;
pub mod preferences;
