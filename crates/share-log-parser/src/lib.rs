//! Content logic for the share viewer
//!
//! Pure, synchronous building blocks shared by the static file view and the
//! live tail:
//!
//! - [`classify`]: decide whether bytes are structured data, log output or plain text
//! - [`highlight_line`] / [`format_structured`]: turn lines into styled spans
//! - [`group`]: cluster rotated log files and find the newest one
//! - [`SearchQuery`]: literal or regex match-and-jump
//!
//! # Example
//!
//! ```
//! use share_log_parser::{ClassifiedContent, ContentKind, render_content};
//!
//! let content = ClassifiedContent::from_bytes(br#"{"level":"info"}"#, "event.txt");
//! assert_eq!(content.kind, ContentKind::Structured);
//!
//! for line in render_content(&content) {
//!     // Each line is a list of spans tagged with a style class
//!     let _ = line.text();
//! }
//! ```

mod classify;
mod highlight;
pub mod rotation;
pub mod search;
mod types;

pub use classify::classify;
pub use highlight::{format_structured, highlight_line, render_content, status_line};
pub use rotation::{group, Grouping, RotationGroup};
pub use search::{SearchError, SearchQuery};
pub use types::*;
