//! Value types shared between the git layer and the page composer.
//!
//! - `coords`: Coordinates and the `/git/...` URL scheme
//! - `commit`: Branch, LogEntry
//! - `tree`: TreeItem, EntryKind, BlobData, FileLookup
//! - `diff`: DiffLineKind
//!
//! All of these are read-only snapshots built fresh per request and dropped
//! when the response is written.

pub mod commit;
pub mod coords;
pub mod diff;
pub mod tree;

pub use commit::*;
pub use coords::*;
pub use diff::*;
pub use tree::*;
