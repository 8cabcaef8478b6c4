// Data structures and types

pub mod connection;
pub mod selection;

pub use connection::{ConnectionConfig, SavedProfile};
pub use selection::{EndpointKind, SelectedFile, SelectionState};
