//! Export orchestration.
//!
//! A run has four strictly ordered phases: plan every destination and fail
//! on collisions, rewrite page bodies in memory, copy assets, write pages.
//! Nothing touches the destination until the whole plan has validated, so
//! a collision can never leave a half-written tree behind.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use wikiport_links::{LinkScanner, Replacement, ResolvedTarget, resolve_target, rewrite_body};
use wikiport_tree::{Diagnostic, Diagnostics, PageId, WikiTree};

use crate::convention::Convention;

/// Fatal export failures. Recoverable problems go through [`Diagnostics`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// Two sources map to the same destination path.
    #[error("destination collision: {first} and {second} both map to {destination}")]
    DestinationCollision {
        destination: String,
        first: String,
        second: String,
    },
    /// The destination root lies inside the source tree; the next walk
    /// would re-ingest this run's output.
    #[error("destination {} is inside the source tree {}", .dest.display(), .source.display())]
    DestInsideSource { dest: PathBuf, source: PathBuf },
    /// A root path could not be made absolute.
    #[error("failed to resolve {}: {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A destination file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An asset could not be copied into the destination.
    #[error("failed to copy asset to {}: {source}", .path.display())]
    CopyAsset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Counts from a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Name of the convention the run used.
    pub convention: &'static str,
    pub pages_written: usize,
    pub assets_copied: usize,
    pub links_rewritten: usize,
}

/// One page copy the plan will produce.
struct PlannedPage {
    id: PageId,
    destination: String,
    /// Destination-side directory links are computed from.
    dir: String,
    /// Extra copies drop their diagnostics; the primary copy of the same
    /// source already reported them.
    primary: bool,
}

struct PlannedAsset {
    source_path: PathBuf,
    destination: String,
}

struct Plan {
    pages: Vec<PlannedPage>,
    assets: Vec<PlannedAsset>,
}

/// Outcome of rewriting a single page body.
struct PageRewrite {
    /// `None` when the page was skipped.
    body: Option<String>,
    links_rewritten: usize,
    diagnostics: Diagnostics,
}

/// Runs the full export pipeline for one convention.
pub struct Exporter {
    convention: Box<dyn Convention>,
    scanner: LinkScanner,
}

impl Exporter {
    #[must_use]
    pub fn new(convention: Box<dyn Convention>) -> Self {
        Self {
            convention,
            scanner: LinkScanner::new(),
        }
    }

    /// Export `tree` into `dest_root`.
    ///
    /// The destination root is created if missing. Existing files are
    /// overwritten in place; stale files from earlier runs are left alone.
    /// Output depends only on the tree contents and the convention, so an
    /// unchanged source exports to byte-identical results.
    pub fn export(
        &self,
        tree: &WikiTree,
        dest_root: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<ExportReport, ExportError> {
        check_dest_outside_source(tree.root(), dest_root)?;

        let plan = self.plan(tree)?;
        tracing::debug!(
            pages = plan.pages.len(),
            assets = plan.assets.len(),
            convention = self.convention.name(),
            "Export plan validated"
        );

        // Pages are independent once the plan is fixed, so bodies are
        // rewritten in parallel; results and diagnostics merge back in
        // plan order to keep runs deterministic.
        let rewrites: Vec<PageRewrite> = plan
            .pages
            .par_iter()
            .map(|planned| self.rewrite_page(tree, planned))
            .collect();

        let mut links_rewritten = 0;
        let mut bodies = Vec::with_capacity(rewrites.len());
        for (planned, rewrite) in plan.pages.iter().zip(rewrites) {
            if planned.primary {
                diagnostics.absorb(rewrite.diagnostics);
            }
            links_rewritten += rewrite.links_rewritten;
            bodies.push(rewrite.body);
        }

        fs::create_dir_all(dest_root).map_err(|source| ExportError::Write {
            path: dest_root.to_path_buf(),
            source,
        })?;

        let assets_copied = copy_assets(&plan, dest_root)?;

        let mut pages_written = 0;
        for (planned, body) in plan.pages.iter().zip(bodies) {
            let Some(body) = body else { continue };
            write_file(&dest_root.join(&planned.destination), &body)?;
            pages_written += 1;
        }

        tracing::debug!(
            pages_written,
            assets_copied,
            links_rewritten,
            "Export complete"
        );
        Ok(ExportReport {
            convention: self.convention.name(),
            pages_written,
            assets_copied,
            links_rewritten,
        })
    }

    /// Map every source to its destination, failing on the first duplicate.
    fn plan(&self, tree: &WikiTree) -> Result<Plan, ExportError> {
        let mut claimed = HashMap::new();
        let mut pages = Vec::with_capacity(tree.page_count());

        for (id, page) in tree.pages() {
            let destination = self.convention.page_destination(page);
            claim(&mut claimed, &destination, &page.rel_path)?;
            pages.push(PlannedPage {
                id,
                dir: self.convention.page_dir(page),
                destination,
                primary: true,
            });
        }

        for extra in self.convention.extra_pages(tree) {
            claim(&mut claimed, &extra.destination, &tree.page(extra.source).rel_path)?;
            pages.push(PlannedPage {
                id: extra.source,
                destination: extra.destination,
                dir: extra.dir,
                primary: false,
            });
        }

        let mut assets = Vec::with_capacity(tree.asset_count());
        for asset in tree.assets() {
            let destination = self.convention.asset_destination(asset);
            claim(&mut claimed, &destination, &asset.rel_path)?;
            assets.push(PlannedAsset {
                source_path: asset.source_path.clone(),
                destination,
            });
        }

        Ok(Plan { pages, assets })
    }

    /// Rewrite one page body against the destination layout.
    fn rewrite_page(&self, tree: &WikiTree, planned: &PlannedPage) -> PageRewrite {
        let page = tree.page(planned.id);
        let mut diagnostics = Diagnostics::new();

        let occurrences = match self.scanner.scan(&page.body) {
            Ok(occurrences) => occurrences,
            Err(error) => {
                tracing::warn!(page = %page.rel_path, error = %error, "Skipping page");
                diagnostics.report(Diagnostic::PageSkipped {
                    page: page.rel_path.clone(),
                    reason: error.to_string(),
                });
                return PageRewrite {
                    body: None,
                    links_rewritten: 0,
                    diagnostics,
                };
            }
        };

        let mut replacements = Vec::new();
        for occurrence in occurrences {
            match resolve_target(tree, planned.id, &occurrence.target) {
                ResolvedTarget::Page { id, fragment } => {
                    let mut text = self.convention.page_link(&planned.dir, tree.page(id));
                    append_fragment(&mut text, fragment.as_deref());
                    replacements.push(Replacement {
                        range: occurrence.range,
                        text,
                    });
                }
                ResolvedTarget::Asset { rel_path, fragment } => {
                    if let Some(asset) = tree.asset_by_path(&rel_path) {
                        let mut text = self.convention.asset_link(&planned.dir, asset);
                        append_fragment(&mut text, fragment.as_deref());
                        replacements.push(Replacement {
                            range: occurrence.range,
                            text,
                        });
                    }
                }
                ResolvedTarget::Unresolved => {
                    diagnostics.report(Diagnostic::UnresolvedLink {
                        page: page.rel_path.clone(),
                        target: occurrence.target,
                    });
                }
                ResolvedTarget::External | ResolvedTarget::Anchor => {}
            }
        }

        let links_rewritten = replacements.len();
        let body = rewrite_body(&page.body, replacements);
        PageRewrite {
            body: Some(body),
            links_rewritten,
            diagnostics,
        }
    }
}

fn claim(
    claimed: &mut HashMap<String, String>,
    destination: &str,
    source: &str,
) -> Result<(), ExportError> {
    if let Some(first) = claimed.get(destination) {
        return Err(ExportError::DestinationCollision {
            destination: destination.to_owned(),
            first: first.clone(),
            second: source.to_owned(),
        });
    }
    claimed.insert(destination.to_owned(), source.to_owned());
    Ok(())
}

fn append_fragment(text: &mut String, fragment: Option<&str>) {
    if let Some(fragment) = fragment {
        text.push('#');
        text.push_str(fragment);
    }
}

fn check_dest_outside_source(source_root: &Path, dest_root: &Path) -> Result<(), ExportError> {
    let source_abs = std::path::absolute(source_root).map_err(|source| ExportError::Resolve {
        path: source_root.to_path_buf(),
        source,
    })?;
    let dest_abs = std::path::absolute(dest_root).map_err(|source| ExportError::Resolve {
        path: dest_root.to_path_buf(),
        source,
    })?;
    if dest_abs.starts_with(&source_abs) {
        return Err(ExportError::DestInsideSource {
            dest: dest_abs,
            source: source_abs,
        });
    }
    Ok(())
}

fn copy_assets(plan: &Plan, dest_root: &Path) -> Result<usize, ExportError> {
    for planned in &plan.assets {
        let path = dest_root.join(&planned.destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ExportError::CopyAsset {
                path: path.clone(),
                source,
            })?;
        }
        fs::copy(&planned.source_path, &path).map_err(|source| ExportError::CopyAsset {
            path: path.clone(),
            source,
        })?;
    }
    Ok(plan.assets.len())
}

fn write_file(path: &Path, body: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, body).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
