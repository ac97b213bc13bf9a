//! Injection of host files into build containers.
//!
//! Data flows one way: raw specs are normalized, normalized specs are
//! expanded into container file paths, and those paths feed the cleanup
//! script. The classifier sits to the side and is called wherever the
//! external copy step fails.

pub mod classify;
pub mod cleanup;
pub mod expand;
pub mod normalize;
pub mod types;

pub use classify::{FailureKind, classify, handle_injection_error};
pub use cleanup::{create_cleanup_script, create_cleanup_script_in, render_cleanup_script};
pub use expand::{Expansion, expand_injected_files, expand_injection, expand_partitioned};
pub use normalize::normalize_destinations;
pub use types::{InjectionError, InjectionList, InjectionParseError, InjectionSpec};
