//! Relative link computation between destination paths.
//!
//! Paths here are slash-separated and destination-relative; they never
//! touch the filesystem. Directory links follow RFC 3986 resolution, so a
//! browser or static-site server resolves them the same way these
//! functions produce them.

/// Relative URL from one directory to another, always with a trailing
/// slash. Returns `"./"` for the same directory.
pub(crate) fn relative_dir_link(from_dir: &str, to_dir: &str) -> String {
    let from_segs: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to_dir.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_segs
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_segs.len() - common;
    let remaining = &to_segs[common..];

    let mut result = "../".repeat(ups);
    if !remaining.is_empty() {
        result.push_str(&remaining.join("/"));
        result.push('/');
    }
    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}

/// Relative URL from a directory to a file.
pub(crate) fn relative_file_link(from_dir: &str, to_file: &str) -> String {
    let from_segs: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to_file.split('/').filter(|s| !s.is_empty()).collect();

    // Only the directory part of the target participates in the common
    // prefix; the file name always remains.
    let to_dirs = &to_segs[..to_segs.len().saturating_sub(1)];
    let common = from_segs
        .iter()
        .zip(to_dirs)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_segs.len() - common;
    let remaining = &to_segs[common..];

    format!("{}{}", "../".repeat(ups), remaining.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_link_child() {
        assert_eq!(relative_dir_link("home/about", "home/about/features"), "features/");
        assert_eq!(relative_dir_link("", "home"), "home/");
    }

    #[test]
    fn test_dir_link_parent() {
        assert_eq!(relative_dir_link("home/about", "home"), "../");
        assert_eq!(relative_dir_link("a/b/c", ""), "../../../");
    }

    #[test]
    fn test_dir_link_sibling() {
        assert_eq!(relative_dir_link("home/a", "home/b"), "../b/");
    }

    #[test]
    fn test_dir_link_same_directory() {
        assert_eq!(relative_dir_link("home/about", "home/about"), "./");
        assert_eq!(relative_dir_link("", ""), "./");
    }

    #[test]
    fn test_dir_link_cousin() {
        assert_eq!(relative_dir_link("a/b", "a/c/d"), "../c/d/");
    }

    #[test]
    fn test_file_link_same_directory() {
        assert_eq!(relative_file_link("home", "home/pic.png"), "pic.png");
    }

    #[test]
    fn test_file_link_upward() {
        assert_eq!(
            relative_file_link("home/about", "assets/logo.png"),
            "../../assets/logo.png"
        );
    }

    #[test]
    fn test_file_link_from_root() {
        assert_eq!(relative_file_link("", "assets/logo.png"), "assets/logo.png");
    }

    #[test]
    fn test_file_link_sibling_directory() {
        assert_eq!(
            relative_file_link("home/about", "home/img/pic.png"),
            "../img/pic.png"
        );
    }
}
