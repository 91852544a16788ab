//! In-memory representation of a discovered wiki tree.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Identifier of a page within a [`WikiTree`].
///
/// Ids are dense indices assigned in discovery order; they are only
/// meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub(crate) usize);

/// A markdown page discovered under the source root.
#[derive(Debug, Clone)]
pub struct Page {
    /// Extension-less, slash-joined path identifying the page
    /// (e.g., "home/about_the_features/feature_1").
    pub route: String,
    /// Source-relative on-disk path including the extension
    /// (e.g., "home/about_the_features/feature_1.md").
    pub rel_path: String,
    /// Raw markdown body as read from disk.
    pub body: String,
}

/// A non-markdown file that exporters copy verbatim.
#[derive(Debug, Clone)]
pub struct Asset {
    /// Source-relative path (e.g., "assets/diagram.png").
    pub rel_path: String,
    /// Absolute path used when copying.
    pub source_path: PathBuf,
}

/// The page graph built by [`walk`](crate::walk).
///
/// Holds every page body in memory for the duration of a run. The tree is
/// immutable once built; exporters and resolvers only read from it.
#[derive(Debug)]
pub struct WikiTree {
    root: PathBuf,
    pages: Vec<Page>,
    assets: Vec<Asset>,
    routes: HashMap<String, PageId>,
    asset_paths: HashMap<String, usize>,
    entry: Option<PageId>,
}

impl WikiTree {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            pages: Vec::new(),
            assets: Vec::new(),
            routes: HashMap::new(),
            asset_paths: HashMap::new(),
            entry: None,
        }
    }

    pub(crate) fn push_page(&mut self, page: Page) -> PageId {
        let id = PageId(self.pages.len());
        self.routes.insert(page.route.clone(), id);
        self.pages.push(page);
        id
    }

    pub(crate) fn push_asset(&mut self, asset: Asset) {
        self.asset_paths
            .insert(asset.rel_path.clone(), self.assets.len());
        self.assets.push(asset);
    }

    pub(crate) fn set_entry(&mut self, id: PageId) {
        self.entry = Some(id);
    }

    /// Absolute path of the source root this tree was walked from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a page by id.
    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[id.0]
    }

    /// All pages in discovery order, with their ids.
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &Page)> {
        self.pages.iter().enumerate().map(|(i, p)| (PageId(i), p))
    }

    /// Look up a page by its route (e.g., "home/about").
    pub fn page_by_route(&self, route: &str) -> Option<PageId> {
        self.routes.get(route).copied()
    }

    /// All assets in discovery order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Look up an asset by its source-relative path.
    pub fn asset_by_path(&self, rel_path: &str) -> Option<&Asset> {
        self.asset_paths.get(rel_path).map(|&i| &self.assets[i])
    }

    /// The conventional entry page, if one was found at the tree root.
    pub fn entry(&self) -> Option<PageId> {
        self.entry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }
}
