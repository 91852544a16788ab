//! The site-generator convention.
//!
//! Each page becomes a folder holding an `index.md`, so a static-site
//! generator serves `home/about.md` at `.../home/about/`. The destination
//! hierarchy mirrors the source exactly; assets keep their positions, and
//! page links become relative directory URLs with a trailing slash.
//!
//! When the tree has an entry page, a second copy of it is written to
//! `index.md` at the destination root so the served site has a front page.
//! That copy's links are recomputed from root coordinates; a verbatim copy
//! would carry links that only work one level down.

use wikiport_tree::{Asset, Page, WikiTree};

use crate::convention::{Convention, ExtraPage};
use crate::relpath::{relative_dir_link, relative_file_link};

/// Folder-per-page convention for static-site generators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteGenerator;

impl Convention for SiteGenerator {
    fn name(&self) -> &'static str {
        "site-generator"
    }

    fn page_destination(&self, page: &Page) -> String {
        format!("{}/index.md", page.route)
    }

    fn page_dir(&self, page: &Page) -> String {
        page.route.clone()
    }

    fn page_link(&self, from_dir: &str, to: &Page) -> String {
        relative_dir_link(from_dir, &to.route)
    }

    fn asset_destination(&self, asset: &Asset) -> String {
        asset.rel_path.clone()
    }

    fn asset_link(&self, from_dir: &str, asset: &Asset) -> String {
        relative_file_link(from_dir, &asset.rel_path)
    }

    fn extra_pages(&self, tree: &WikiTree) -> Vec<ExtraPage> {
        tree.entry()
            .map(|source| ExtraPage {
                source,
                destination: "index.md".to_owned(),
                dir: String::new(),
            })
            .into_iter()
            .collect()
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
    fn test_page_destination_mirrors_hierarchy() {
        let convention = SiteGenerator;
        assert_eq!(convention.page_destination(&page("home")), "home/index.md");
        assert_eq!(
            convention.page_destination(&page("home/about/features")),
            "home/about/features/index.md"
        );
    }

    #[test]
    fn test_page_link_is_directory_url() {
        let convention = SiteGenerator;
        assert_eq!(
            convention.page_link("home/about", &page("home/about/features")),
            "features/"
        );
        assert_eq!(convention.page_link("home/about", &page("home")), "../");
        assert_eq!(convention.page_link("", &page("home/about")), "home/about/");
    }

    #[test]
    fn test_asset_keeps_position() {
        let convention = SiteGenerator;
        let asset = Asset {
            rel_path: "assets/logo.png".to_owned(),
            source_path: "/wiki/assets/logo.png".into(),
        };
        assert_eq!(convention.asset_destination(&asset), "assets/logo.png");
        // The page moved one level deeper, so the link gains a `../`.
        assert_eq!(convention.asset_link("home", &asset), "../assets/logo.png");
    }
}
