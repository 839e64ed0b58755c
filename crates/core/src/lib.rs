//! Core business logic for Dispatch.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Rides, clients and couriers come in as plain data; amounts and export rows
//! come out.
//!
//! # Modules
//!
//! - `period` - Semi-monthly billing periods, gaps and potential periods
//! - `billing` - Client invoice and courier paystub fee rules
//! - `import` - Ride import with cached name resolution
//! - `export` - Quickbooks invoice and bill rows

pub mod billing;
pub mod export;
pub mod import;
pub mod period;
