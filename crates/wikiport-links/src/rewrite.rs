//! Body splicing.

use std::ops::Range;

/// Replacement text for one destination byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub range: Range<usize>,
    pub text: String,
}

/// Splice `replacements` into `body`.
///
/// Every byte outside the replaced ranges is preserved as-is. Ranges must
/// not overlap; they may arrive in any order.
pub fn rewrite_body(body: &str, mut replacements: Vec<Replacement>) -> String {
    replacements.sort_by_key(|r| r.range.start);

    let mut out = String::with_capacity(body.len());
    let mut cursor = 0;
    for replacement in replacements {
        debug_assert!(
            replacement.range.start >= cursor,
            "overlapping replacement ranges"
        );
        out.push_str(&body[cursor..replacement.range.start]);
        out.push_str(&replacement.text);
        cursor = replacement.range.end;
    }
    out.push_str(&body[cursor..]);
    out
}
