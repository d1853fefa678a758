//! # Reshape
//!
//! Pure data-reshaping filters for template rendering: merging, projecting
//! and regrouping records, flattening nested structures into paths,
//! printf-style formatting, and a few predicates for selecting hosts by
//! network or name.
//!
//! ## Usage
//!
//! ```bash
//! reshape apply merge --input host.json --arg '{"port": 80}'
//! reshape render hosts.j2 --data inventory.yaml
//! ```
//!
//! ## Modules
//!
//! - `filters` - The typed filter functions, grouped by family
//! - `registry` - Name-based dispatch with argument binding and tera integration
//! - `value` - Shape classification, truthiness and `str()`-style rendering of values
//! - `config` - Registry configuration from TOML and environment variables
//! - `error` - Error kinds and codes shared by every filter
pub mod config;
pub mod error;
pub mod filters;
pub mod registry;
pub mod value;

pub use config::RegistryConfig;
pub use error::{FilterError, Result};
pub use registry::{render_str, FilterRegistry};
pub use value::Record;
