//! Cost and pricing engine for tree-service companies.
//!
//! This crate turns equipment specs, employee career-track codes and job
//! parameters into hourly costs, employee codes, margin-based billing rates
//! and line-item quotes. The calculation functions are pure; the `api`
//! module exposes them over HTTP with audit traces.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
