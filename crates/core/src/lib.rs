//! Roombook Core Library
//!
//! In-memory room booking registry: conflict-checked reservations,
//! availability checks, and occupancy queries.

pub mod error;
pub mod interval;
pub mod invariants;
pub mod manifest;
pub mod models;
pub mod registry;

pub use error::{BookingError, Error, Result};
pub use interval::TimeRange;
pub use manifest::{BookingEntry, BookingManifest, ManifestLoad};
pub use models::*;
pub use registry::{BookingRegistry, BookingResult};
