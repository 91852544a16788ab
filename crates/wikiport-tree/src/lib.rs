//! Wiki source tree discovery for wikiport.
//!
//! This crate walks a hierarchical folder of markdown pages and builds the
//! in-memory [`WikiTree`] the rest of the pipeline operates on. It handles:
//!
//! - Recursive directory scanning in deterministic (sorted) order
//! - Page vs. asset classification by file extension
//! - Hidden-entry and configured-directory exclusion
//! - Entry-page detection and recoverable [`Diagnostics`]
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wikiport_tree::{Diagnostics, WalkOptions, walk};
//!
//! let mut diagnostics = Diagnostics::new();
//! let tree = walk(Path::new("wiki"), &WalkOptions::default(), &mut diagnostics)?;
//! for (_, page) in tree.pages() {
//!     println!("{}", page.route);
//! }
//! ```

mod diagnostics;
mod scanner;
mod tree;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use scanner::{WalkError, WalkOptions, walk};
pub use tree::{Asset, Page, PageId, WikiTree};
