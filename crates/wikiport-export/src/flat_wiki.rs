//! The flat-wiki convention.
//!
//! Wiki hosts store pages in a single namespace: the nested route is
//! joined into one name with a separator, the file keeps its `.md`
//! extension on disk, and links use the bare name without extension
//! (`home/about/features.md` becomes `home-about-features.md`, linked as
//! `home-about-features`). Links are namespace lookups rather than
//! relative paths, so they read the same from every page.
//!
//! Distinct routes can flatten to the same name (`home/about.md` next to
//! `home-about.md`); the exporter's plan phase fails fast on that before
//! anything is written.

use wikiport_tree::{Asset, Page};

use crate::convention::Convention;

/// Separator-joined single-namespace convention for wiki hosts.
#[derive(Debug, Clone)]
pub struct FlatWiki {
    separator: String,
}

impl FlatWiki {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    fn flatten(&self, route: &str) -> String {
        route.replace('/', &self.separator)
    }
}

impl Default for FlatWiki {
    fn default() -> Self {
        Self::new("-")
    }
}

impl Convention for FlatWiki {
    fn name(&self) -> &'static str {
        "flat-wiki"
    }

    fn page_destination(&self, page: &Page) -> String {
        format!("{}.md", self.flatten(&page.route))
    }

    fn page_dir(&self, _page: &Page) -> String {
        String::new()
    }

    fn page_link(&self, _from_dir: &str, to: &Page) -> String {
        self.flatten(&to.route)
    }

    fn asset_destination(&self, asset: &Asset) -> String {
        asset.rel_path.clone()
    }

    fn asset_link(&self, _from_dir: &str, asset: &Asset) -> String {
        asset.rel_path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(route: &str) -> Page {
        Page {
            route: route.to_owned(),
            rel_path: format!("{route}.md"),
            body: String::new(),
        }
    }

    #[test]
    fn test_page_destination_flattens_route() {
        let convention = FlatWiki::default();
        assert_eq!(convention.page_destination(&page("home")), "home.md");
        assert_eq!(
            convention.page_destination(&page("home/about/features")),
            "home-about-features.md"
        );
    }

    #[test]
    fn test_page_link_is_bare_name() {
        let convention = FlatWiki::default();
        assert_eq!(
            convention.page_link("", &page("home/about/features")),
            "home-about-features"
        );
        // Identical from any origin.
        assert_eq!(
            convention.page_link("anything", &page("home/about/features")),
            "home-about-features"
        );
    }

    #[test]
    fn test_custom_separator() {
        let convention = FlatWiki::new("_");
        assert_eq!(
            convention.page_destination(&page("a/b/c")),
            "a_b_c.md"
        );
        assert_eq!(convention.page_link("", &page("a/b/c")), "a_b_c");
    }

    #[test]
    fn test_slash_separator_preserves_hierarchy() {
        // Wiki hosts with pathed page names keep the nested layout.
        let convention = FlatWiki::new("/");
        assert_eq!(convention.page_destination(&page("a/b")), "a/b.md");
        assert_eq!(convention.page_link("", &page("a/b")), "a/b");
    }

    #[test]
    fn test_asset_untouched() {
        let convention = FlatWiki::default();
        let asset = Asset {
            rel_path: "home/img/pic.png".to_owned(),
            source_path: "/wiki/home/img/pic.png".into(),
        };
        assert_eq!(convention.asset_destination(&asset), "home/img/pic.png");
        assert_eq!(convention.asset_link("", &asset), "home/img/pic.png");
    }
}
