//! # Filament Catalog Common Library
//!
//! Core of the filament catalog:
//! - Filament records and badge canonicalization
//! - Spec normalizer and radar chart scores
//! - Predicate library and filter engine
//! - Session state, comparison tables and saved state
//! - Dataset loading and configuration

pub mod badges;
pub mod charts;
pub mod comparison;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod persistence;
pub mod predicates;
pub mod session;

pub use error::{Error, Result};
pub use filter::{apply_filters, FilterGroup, FilterOption, FilterSelection};
pub use model::{Filament, Tier};
pub use session::Session;
