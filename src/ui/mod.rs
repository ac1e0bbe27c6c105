// Page surface
// The host trait reader mode drives, the markup parser and the headless page model.

pub mod headless;
pub mod markup;
pub mod page_host;
