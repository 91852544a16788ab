//! Relative link handling for wikiport.
//!
//! Three pure pieces that the exporters compose:
//!
//! - [`LinkScanner`] finds every rewritable destination in a page body,
//!   with exact byte ranges
//! - [`resolve_target`] maps a destination to a page, an asset, an
//!   external URL, or nothing
//! - [`rewrite_body`] splices replacement destinations back into the body
//!
//! Bodies are parsed with the real markdown parser, so destinations inside
//! code fences and code spans are never touched, and everything outside a
//! rewritten destination survives byte for byte.

mod resolve;
mod rewrite;
mod scan;

pub use resolve::{ResolvedTarget, resolve_target};
pub use rewrite::{Replacement, rewrite_body};
pub use scan::{LinkKind, LinkOccurrence, LinkScanner, ScanError};
