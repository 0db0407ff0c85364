//! Pasusat: terminal dashboard for the Thai livestock census.
//!
//! Loads the census export (TIS-620 CSV) once per session, normalizes its
//! header, coerces head and farmer counts, and maps every livestock species
//! to its columns up front. Views read from that prepared table only.
//!
//! ## Layers
//!
//! - **Preparation** (`data`, `format`, `catalog`, `species`): decoding,
//!   header normalization, numeric coercion, column catalog.
//! - **Queries** (`aggregate`, `analysis`, `report`): region rankings,
//!   species totals, scatter pairs, and the four dashboard views.
//! - **Terminal** (`app`, `tui`, `ui`): session state and rendering.

pub mod aggregate;
pub mod analysis;
pub mod app;
pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod report;
pub mod species;
pub mod tui;
pub mod ui;
