// * Service: the thin HTTP collaborator around the refinery core

pub mod envelope;
pub mod handler;

pub use envelope::{ResponseOptions, ShipRecordView, ShipsEnvelope};
pub use handler::{handle, serve, AppState};
