//! Board selection, reconnection and discovery services

pub mod catalog;
pub mod discovery;
pub mod events;
pub mod reconnect;
pub mod selection;

pub use catalog::{BoardCatalog, CatalogEntry};
pub use discovery::{BoardDiscovery, DiscoveryWatcher, SerialPortDiscovery};
pub use events::EventHub;
pub use reconnect::{ReconnectMatch, find_reconnect_target};
pub use selection::{BoardSelectionService, LATEST_VALID_CONFIG_KEY};
