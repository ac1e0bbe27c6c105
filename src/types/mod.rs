// yaub-reader shared type definitions

pub mod errors;
pub mod keyboard;
pub mod page;
pub mod reader;
pub mod settings;
