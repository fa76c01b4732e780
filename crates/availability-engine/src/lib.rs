//! # availability-engine
//!
//! Resolves the single common meeting window across availability ranges submitted
//! by participants in different countries.
//!
//! Every participant proposes a range with an explicit UTC offset and a country code.
//! The engine rejects ranges whose start day is a weekend or a public holiday in the
//! participant's country, converts the survivors to UTC and intersects them.
//!
//! ## Quick start
//!
//! ```rust
//! use availability_engine::{intersect, NormalizedRange};
//!
//! let ranges = vec![
//!     NormalizedRange::new(
//!         "2022-05-02T01:00:00Z".parse().unwrap(),
//!         "2022-05-02T09:00:00Z".parse().unwrap(),
//!     ),
//!     NormalizedRange::new(
//!         "2022-05-02T08:00:00Z".parse().unwrap(),
//!         "2022-05-02T16:00:00Z".parse().unwrap(),
//!     ),
//! ];
//! let slot = intersect(&ranges).unwrap();
//! assert_eq!(slot.format().from, "2022-05-02T08:00:00.0Z");
//! assert_eq!(slot.format().to, "2022-05-02T09:00:00.0Z");
//! ```
//!
//! ## Modules
//!
//! - [`calendar`] — Weekend rule and the calendar exclusion validator
//! - [`config`] — Holiday directory and cache settings
//! - [`country`] — Supported ISO-3166 alpha-2 country codes
//! - [`holidays`] — Holiday provider, TTL cache and the Calendarific client
//! - [`intersect`] — Intersection of normalized ranges
//! - [`range`] — Range types, UTC normalization and day splitting
//! - [`resolver`] — End-to-end pipeline: validate, normalize, intersect
//! - [`schema`] — Inbound JSON validation
//! - [`slot`] — The resolved slot and its wire format
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod country;
pub mod error;
pub mod holidays;
pub mod intersect;
pub mod range;
pub mod resolver;
pub mod schema;
pub mod slot;

pub use calendar::{is_weekend, CalendarConflict, CalendarValidator, ExclusionReason};
pub use config::EngineConfig;
pub use country::CountryCode;
pub use error::{EngineError, ValidationErrors};
pub use holidays::{
    CalendarificClient, HolidayCache, HolidayProvider, HolidaySet, HolidaySource, MemoryCache,
};
pub use intersect::intersect;
pub use range::{normalize, split_days, AvailabilityRange, NormalizedRange};
pub use resolver::SlotResolver;
pub use schema::parse_ranges;
pub use slot::{format_timestamp, FormattedSlot, ResultSlot};
