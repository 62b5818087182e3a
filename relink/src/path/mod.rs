//! Path handling for the sync protocol.
//!
//! Two concerns live here:
//!
//! - **Normalization** ([`normalize`]): reducing a slash-delimited path to
//!   its canonical relative form. `normalize::normalize_segments` is the
//!   pure routine the lock-path derivation is specified against; it drops
//!   empty and `.` segments and resolves `..` against preceding segments.
//!   `normalize::expand_tilde` handles `~` in user-supplied paths.
//! - **Resolution** ([`resolve`]): following symlinks to the real
//!   filesystem path, with I/O errors mapped to the library's error kinds.
//!
//! # Examples
//!
//! ```
//! use relink::path::normalize::normalize_segments;
//!
//! assert_eq!(normalize_segments("/etc/hosts"), "etc/hosts");
//! assert_eq!(normalize_segments(".././/tmp/../home//admin/./.ssh"), "home/admin/.ssh");
//! ```

pub mod normalize;
pub mod resolve;

pub use normalize::{expand_tilde, normalize_segments};
pub use resolve::resolve_real;
