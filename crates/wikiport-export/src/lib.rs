//! Destination layouts and the export pipeline.
//!
//! A [`Convention`] decides where each page and asset of a walked tree
//! lands and how links between them are spelled:
//!
//! - [`SiteGenerator`] turns every page into a folder holding an
//!   `index.md`, the layout static site generators expect.
//! - [`FlatWiki`] flattens nested routes into single-level file names
//!   joined by a separator, the layout flat wiki hosts expect.
//!
//! The [`Exporter`] drives a full run: it plans every destination up
//! front, rejects colliding layouts before anything is written, rewrites
//! page links in memory, then copies assets and writes pages.

mod convention;
mod exporter;
mod flat_wiki;
mod relpath;
mod site_generator;

pub use convention::{Convention, ExtraPage};
pub use exporter::{ExportError, ExportReport, Exporter};
pub use flat_wiki::FlatWiki;
pub use site_generator::SiteGenerator;
