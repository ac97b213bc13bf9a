//! henge-lib: Secret injection core for container image builds
//!
//! This crate computes everything needed to place host files ("injections")
//! inside a build container and to destroy their contents afterwards:
//! - `injection::normalize`: rewrite relative destinations against a working directory
//! - `injection::expand`: flatten file and directory injections into container paths
//! - `injection::cleanup`: emit a truncation script for every injected file
//! - `injection::classify`: turn copy failures into actionable diagnostics
//!
//! It never copies files itself and never manages container lifecycle.

pub mod config;
pub mod consts;
pub mod diagnostics;
pub mod injection;
pub mod util;
