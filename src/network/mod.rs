pub mod client;
pub mod errors;
pub mod identity;

pub use client::{FetchedTables, UpstreamClient};
pub use errors::UpstreamError;
pub use identity::RequestIdentity;
