//! The hosting-convention strategy seam.
//!
//! A convention decides two things and nothing else: where a page or asset
//! lands in the destination tree, and what a link to it looks like from a
//! given destination-side directory. The exporter owns all orchestration,
//! so new conventions are a single impl away.

use wikiport_tree::{Asset, Page, PageId, WikiTree};

/// An additional copy of a source page emitted by a convention, such as a
/// front page materialized at the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraPage {
    /// Page whose rewritten body is duplicated.
    pub source: PageId,
    /// Destination path of the copy.
    pub destination: String,
    /// Destination-side directory the copy's links are computed from.
    pub dir: String,
}

/// Mapping from source pages and assets to destination paths and link text.
///
/// Link text is always computed in destination coordinates: `from_dir` is
/// the directory the *rewritten* page lives in, never the source layout.
/// Implementations are stateless and chosen once per run.
pub trait Convention: Send + Sync {
    /// Convention identifier as shown in reports.
    fn name(&self) -> &'static str;

    /// Destination path (relative to the destination root) for a page.
    fn page_destination(&self, page: &Page) -> String;

    /// Destination-side directory the rewritten page lives in.
    fn page_dir(&self, page: &Page) -> String;

    /// Link text for a link to `to`, written from `from_dir`.
    fn page_link(&self, from_dir: &str, to: &Page) -> String;

    /// Destination path (relative to the destination root) for an asset.
    fn asset_destination(&self, asset: &Asset) -> String;

    /// Link text for a link to `asset`, written from `from_dir`.
    fn asset_link(&self, from_dir: &str, asset: &Asset) -> String;

    /// Destination copies beyond the one-per-page mapping.
    fn extra_pages(&self, tree: &WikiTree) -> Vec<ExtraPage> {
        let _ = tree;
        Vec::new()
    }
}
