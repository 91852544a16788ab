//! Destination resolution against the page graph.
//!
//! Pure with respect to the filesystem: a destination and the resolving
//! page go in, a [`ResolvedTarget`] comes out. Relative destinations are
//! resolved against the folder containing the page, with filesystem
//! `.`/`..` semantics.

use wikiport_tree::{PageId, WikiTree};

/// What a link destination refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// External or host-absolute URL, passed through untouched.
    External,
    /// Fragment-only link to the current page, passed through untouched.
    Anchor,
    /// Another page in the tree.
    Page {
        id: PageId,
        fragment: Option<String>,
    },
    /// A non-markdown file in the tree.
    Asset {
        rel_path: String,
        fragment: Option<String>,
    },
    /// Nothing in the tree matches; the raw text is left as written.
    Unresolved,
}

/// Resolve a raw destination as written in the page `from`.
///
/// A `.md` suffix is optional (`about.md` and `about` name the same page),
/// as is a trailing slash. `..` traversal past the tree root resolves to
/// nothing rather than clamping at the root.
pub fn resolve_target(tree: &WikiTree, from: PageId, raw: &str) -> ResolvedTarget {
    if is_external(raw) {
        return ResolvedTarget::External;
    }
    if raw.starts_with('#') {
        return ResolvedTarget::Anchor;
    }

    let (path_part, fragment) = match raw.find('#') {
        Some(pos) => (&raw[..pos], Some(raw[pos + 1..].to_owned())),
        None => (raw, None),
    };

    let base = parent_dir(&tree.page(from).route);
    let Some(normalized) = normalize_relative(path_part, base) else {
        return ResolvedTarget::Unresolved;
    };
    if normalized.is_empty() {
        return ResolvedTarget::Unresolved;
    }

    let route = normalized.strip_suffix(".md").unwrap_or(&normalized);
    if let Some(id) = tree.page_by_route(route) {
        return ResolvedTarget::Page { id, fragment };
    }
    if let Some(asset) = tree.asset_by_path(&normalized) {
        return ResolvedTarget::Asset {
            rel_path: asset.rel_path.clone(),
            fragment,
        };
    }
    ResolvedTarget::Unresolved
}

/// True for URLs the rewriter must never touch.
///
/// Covers scheme-prefixed URLs, protocol-relative `//`, and host-absolute
/// paths. Only tree-relative destinations are candidates for rewriting.
fn is_external(url: &str) -> bool {
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with('/')
    {
        return true;
    }
    // Any other scheme: a ':' appearing before the first '/'.
    url.find(':').is_some_and(|pos| !url[..pos].contains('/'))
}

/// Folder containing a page route ("home/about" lives in "home").
fn parent_dir(route: &str) -> &str {
    route.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Resolve `relative` against the directory `base`.
///
/// Empty and `.` components are skipped; `..` pops a segment. Returns
/// `None` when `..` underflows past the root, which callers report as an
/// unresolved link instead of silently clamping.
fn normalize_relative(relative: &str, base: &str) -> Option<String> {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(component),
        }
    }
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use wikiport_tree::{Diagnostics, WalkOptions, walk};

    fn build_tree(paths: &[&str]) -> (tempfile::TempDir, WikiTree) {
        let dir = tempfile::tempdir().unwrap();
        for rel in paths {
            let full = dir.path().join(rel);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, "").unwrap();
        }
        let mut diagnostics = Diagnostics::new();
        let tree = walk(dir.path(), &WalkOptions::default(), &mut diagnostics).unwrap();
        (dir, tree)
    }

    fn page(tree: &WikiTree, route: &str) -> PageId {
        tree.page_by_route(route).unwrap()
    }

    fn resolved_route(tree: &WikiTree, from: &str, raw: &str) -> Option<String> {
        match resolve_target(tree, page(tree, from), raw) {
            ResolvedTarget::Page { id, .. } => Some(tree.page(id).route.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_resolve_sibling() {
        let (_dir, tree) = build_tree(&["home.md", "home/about.md", "home/contact.md"]);

        assert_eq!(
            resolved_route(&tree, "home/about", "contact.md"),
            Some("home/contact".to_owned())
        );
        assert_eq!(
            resolved_route(&tree, "home/about", "./contact.md"),
            Some("home/contact".to_owned())
        );
    }

    #[test]
    fn test_resolve_child_and_parent() {
        let (_dir, tree) = build_tree(&["home.md", "home/about.md", "home/about/features.md"]);

        assert_eq!(
            resolved_route(&tree, "home/about", "about/features.md"),
            Some("home/about/features".to_owned())
        );
        assert_eq!(
            resolved_route(&tree, "home/about/features", "../about.md"),
            Some("home/about".to_owned())
        );
        assert_eq!(
            resolved_route(&tree, "home/about/features", "../../home.md"),
            Some("home".to_owned())
        );
    }

    #[test]
    fn test_resolve_extension_optional() {
        let (_dir, tree) = build_tree(&["home.md", "home/about.md"]);

        assert_eq!(
            resolved_route(&tree, "home", "home/about"),
            Some("home/about".to_owned())
        );
        assert_eq!(
            resolved_route(&tree, "home", "home/about.md"),
            Some("home/about".to_owned())
        );
    }

    #[test]
    fn test_resolve_trailing_slash() {
        let (_dir, tree) = build_tree(&["home.md", "home/about.md"]);

        assert_eq!(
            resolved_route(&tree, "home", "home/about/"),
            Some("home/about".to_owned())
        );
    }

    #[test]
    fn test_resolve_fragment_split() {
        let (_dir, tree) = build_tree(&["home.md", "home/about.md"]);

        let target = resolve_target(&tree, page(&tree, "home"), "home/about.md#setup");
        match target {
            ResolvedTarget::Page { id, fragment } => {
                assert_eq!(tree.page(id).route, "home/about");
                assert_eq!(fragment.as_deref(), Some("setup"));
            }
            other => panic!("expected page, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_anchor_only() {
        let (_dir, tree) = build_tree(&["home.md"]);

        assert_eq!(
            resolve_target(&tree, page(&tree, "home"), "#section"),
            ResolvedTarget::Anchor
        );
    }

    #[test]
    fn test_resolve_external_urls() {
        let (_dir, tree) = build_tree(&["home.md"]);
        let from = page(&tree, "home");

        for url in [
            "http://example.com/a.md",
            "https://example.com",
            "//cdn.example.com/x.png",
            "mailto:team@example.com",
            "tel:+123456",
            "/absolute/path.md",
            "ftp://host/file.md",
        ] {
            assert_eq!(
                resolve_target(&tree, from, url),
                ResolvedTarget::External,
                "{url} should be external"
            );
        }
    }

    #[test]
    fn test_resolve_asset() {
        let (_dir, tree) = build_tree(&["home.md", "assets/logo.png"]);

        let target = resolve_target(&tree, page(&tree, "home"), "assets/logo.png");
        assert_eq!(
            target,
            ResolvedTarget::Asset {
                rel_path: "assets/logo.png".to_owned(),
                fragment: None,
            }
        );
    }

    #[test]
    fn test_resolve_asset_relative() {
        let (_dir, tree) = build_tree(&["home.md", "home/about.md", "home/img/pic.png"]);

        let target = resolve_target(&tree, page(&tree, "home/about"), "img/pic.png");
        assert_eq!(
            target,
            ResolvedTarget::Asset {
                rel_path: "home/img/pic.png".to_owned(),
                fragment: None,
            }
        );
    }

    #[test]
    fn test_resolve_asset_fragment() {
        let (_dir, tree) = build_tree(&["home.md", "manual.pdf"]);

        let target = resolve_target(&tree, page(&tree, "home"), "manual.pdf#page=3");
        assert_eq!(
            target,
            ResolvedTarget::Asset {
                rel_path: "manual.pdf".to_owned(),
                fragment: Some("page=3".to_owned()),
            }
        );
    }

    #[test]
    fn test_resolve_traversal_past_root() {
        let (_dir, tree) = build_tree(&["home.md", "home/about.md"]);

        assert_eq!(
            resolve_target(&tree, page(&tree, "home/about"), "../../outside.md"),
            ResolvedTarget::Unresolved
        );
    }

    #[test]
    fn test_resolve_missing_target() {
        let (_dir, tree) = build_tree(&["home.md"]);

        assert_eq!(
            resolve_target(&tree, page(&tree, "home"), "nonexistent.md"),
            ResolvedTarget::Unresolved
        );
    }

    #[test]
    fn test_resolve_directory_reference() {
        let (_dir, tree) = build_tree(&["home.md", "home/about.md"]);

        // A bare directory is not a page.
        assert_eq!(
            resolve_target(&tree, page(&tree, "home/about"), "./"),
            ResolvedTarget::Unresolved
        );
    }

    #[test]
    fn test_resolve_page_wins_over_asset() {
        // "data.md" is a page routed as "data"; "data" is a separate asset.
        let (_dir, tree) = build_tree(&["home.md", "data.md", "data"]);

        let target = resolve_target(&tree, page(&tree, "home"), "data");
        assert!(matches!(target, ResolvedTarget::Page { .. }));
    }
}
