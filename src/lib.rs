//! yaub-reader: reader mode, reading progress and font-size control for the
//! yaub documentation theme.
//!
//! The controller is host-independent: the page, the preference store and the
//! clock are injected. This crate ships a headless page model, SQLite-backed
//! preferences and a JSON-RPC surface.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
pub mod ui;
