//! # Core
//!
//! Settings that are independent of any UI technology.
//!
//! ## Modules
//!
//! - [`config`]: config file loading and resolution against CLI overrides

pub mod config;
