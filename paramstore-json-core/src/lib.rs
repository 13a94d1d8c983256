//! # paramstore-json core
//!
//! Rebuilds hierarchically named parameters into nested JSON documents.
//!
//! A parameter store holds flat `(path, type, value)` entries such as
//! `/myapp/prod/db/username`. Reading a path prefix with [`JsonReader`]
//! fetches every entry below it, page by page, and folds them into one tree:
//!
//! - path segments below the prefix become nested objects
//! - `StringList` values are split on `,` into arrays
//! - objects whose keys are all indices (`0`, `1`, ...) become arrays
//!
//! The fetch side is the [`ParameterSource`] trait. The AWS Systems Manager
//! implementation lives in `paramstore-json-aws`; [`MemoryParameterSource`]
//! serves tests and local runs.
//!
//! ## Quick Start
//!
//! ```ignore
//! use paramstore_json_core::{JsonReader, MemoryParameterSource, ParameterRecord};
//!
//! let source = MemoryParameterSource::from_records(vec![
//!     ParameterRecord::plain("/myapp/dev/db/username", "dev-user"),
//!     ParameterRecord::list("/myapp/dev/hosts", "a.internal,b.internal"),
//! ]);
//! let reader = JsonReader::new(source);
//! let json = reader.read("/myapp").await?;
//! // {"dev": {"db": {"username": "dev-user"}, "hosts": ["a.internal", "b.internal"]}}
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod normalize;
pub mod pagination;
pub mod reader;
pub mod record;
pub mod source;
pub mod tree;
pub mod value;

// Re-export main types
pub use config::ReaderConfig;
pub use error::{ReaderError, Result, SourceError, SourceResult};
pub use memory::MemoryParameterSource;
pub use normalize::normalize;
pub use pagination::{fetch_all, fold_pages};
pub use reader::JsonReader;
pub use record::{ParameterKind, ParameterRecord};
pub use source::{Page, PageRequest, ParameterSource};
pub use tree::{build_tree, fold};
pub use value::{ParamMap, ParamValue};
