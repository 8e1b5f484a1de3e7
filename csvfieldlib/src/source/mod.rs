//! Sources: where the CSV bytes come from.
//!
//! This module covers the first stage of the pipeline - getting from a
//! host's file handles to raw bytes. It provides:
//!
//! - **File references**: `FileReference`, the host-owned handle with its
//!   description, cache tags and display attributes
//! - **Loading**: the `FileSource` trait, with filesystem and in-memory
//!   implementations
//! - **Discovery**: find `.csv` files on disk with glob patterns
//!
//! ## Example
//!
//! ```rust,ignore
//! use csvfieldlib::source::{discover_files, FileReference, FilterConfig};
//!
//! let filter = FilterConfig::new().exclude("**/archive/**")?;
//! let files: Vec<FileReference> = discover_files("uploads", &filter)?
//!     .into_iter()
//!     .map(FileReference::from_path)
//!     .collect();
//! ```

pub mod file;
pub mod filter;

pub use file::{Attributes, FileReference, FileSource, LocalFileSource, MemorySource};
pub use filter::{discover_all, discover_files, FilterConfig};
