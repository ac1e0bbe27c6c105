// yaub-reader services
// The reader-mode controller and what it is built from: progress tracking, scheduling, settings.

pub mod reader_mode;
pub mod reading_progress;
pub mod scheduler;
pub mod settings_engine;
