//! Data models for room bookings

mod availability;
mod booking;

pub use availability::*;
pub use booking::*;
