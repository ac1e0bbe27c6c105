// yaub-reader input managers

pub mod shortcut_manager;
