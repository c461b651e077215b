// * Ship Lineup
// * Streams the port authority's expected-vessels page, locates the lineup table and
// * normalises each vessel row into a typed record.

pub mod config;
pub mod network;
pub mod ops;
pub mod refinery;
pub mod service;
