//! Output assembly: turn projected values into display entries.
//!
//! This module handles the last stage of the pipeline - wrapping each file's
//! values in a list entry and, when configured, appending file links. It
//! provides:
//!
//! - **DisplayEntry**: either a `ListDisplay` or a `FileLink`
//! - **assemble**: the ordered entries for a batch of files, with per-file
//!   failures kept aside
//!
//! ## Example
//!
//! ```rust,ignore
//! use csvfieldlib::output::assemble;
//!
//! let assembly = assemble(&mut files, &LocalFileSource::new(), &settings);
//! for entry in &assembly.entries { /* hand to the template layer */ }
//! ```

pub mod display;

pub use display::{
    assemble, Assembly, DisplayEntry, FileFailure, FileLink, ListDisplay, ITEM_LIST_CLASS,
    LIST_TYPE, WRAPPER_CLASS,
};
