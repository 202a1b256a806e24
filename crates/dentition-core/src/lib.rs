//! dentition-core: Dental anatomy catalog, search and development timeline.
//!
//! This crate defines the tooth record model, the static reference catalog,
//! and the pure transforms built on it: free-text search, arch ordering for
//! charts, reference-table sorting, and the steppable eruption timeline.

pub mod catalog;
pub mod chart;
pub mod error;
pub mod model;
pub mod navigator;
pub mod search;
pub mod table;
pub mod timeline;
