//! Booking manifest schema and loader
//!
//! A manifest is a TOML file of `[[booking]]` tables used to seed a
//! registry from outside. Entries are only parsed here; the registry decides
//! whether to accept them.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{BookingError, Result};
use crate::models::{Booking, BookingRequest};

/// Bookings loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingManifest {
    #[serde(default, rename = "booking")]
    pub bookings: Vec<BookingEntry>,
}

/// One `[[booking]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEntry {
    /// Room identifier
    pub room: String,
    /// Start instant, `YYYY-MM-DDTHH:MM:SS`
    pub start: NaiveDateTime,
    /// End instant, `YYYY-MM-DDTHH:MM:SS`
    pub end: NaiveDateTime,
    /// Event name
    pub event: String,
    pub organizer: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl BookingEntry {
    pub fn to_request(&self) -> BookingRequest {
        let request = BookingRequest::new(
            self.room.clone(),
            self.start,
            self.end,
            self.event.clone(),
            self.organizer.clone(),
        );
        match &self.description {
            Some(description) => request.with_description(description.clone()),
            None => request,
        }
    }
}

impl BookingManifest {
    /// Parse a manifest from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a manifest file
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let manifest = Self::from_toml(&content)?;
        tracing::debug!(entries = manifest.bookings.len(), "Parsed booking manifest");
        Ok(manifest)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

/// What happened to each manifest entry during a load
#[derive(Debug, Clone, Default)]
pub struct ManifestLoad {
    /// Bookings created, in manifest order
    pub loaded: Vec<Booking>,
    /// Entry index and the reason it was turned down
    pub rejected: Vec<(usize, BookingError)>,
}

impl ManifestLoad {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}
