//! Core types and trait definitions for the Duebook assignment tracker.
//!
//! No HTTP or database code lives here. Storage backends implement
//! [`store::PlannerStore`] and [`assets::AssetStore`]; everything else drives
//! them through [`planner::Planner`].

pub mod assets;
pub mod assignment;
pub mod calendar;
pub mod error;
pub mod planner;
pub mod store;
pub mod subject;
pub mod upcoming;

pub use error::{Error, Result};
