//! Domain models shared across the race telemetry analytics pipeline.
//!
//! This crate contains the data model described in the pipeline
//! specification: the columnar [`MasterTable`](domain::MasterTable), the
//! [`OvertakeEvent`](entities::OvertakeEvent) record and its
//! [`ReasonCode`](entities::ReasonCode) enum, and geospatial boundary
//! summaries. Every other crate in the workspace depends on this one.

pub mod channels;
pub mod domain;
pub mod entities;
pub mod store;

pub use domain::MasterTable;
pub use entities::{
    BoundingBox, LlmContextInput, OvertakeEvent, ReasonCode, SectorBoundary, TrackBoundary,
};
