/// Entry kinds a listing distinguishes. Submodule commits and other object
/// types are skipped when listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Tree,
    Blob,
}

/// Single entry of a tree listing, in backend-native order.
#[derive(Debug, Clone)]
pub struct TreeItem {
    pub name: String,
    pub kind: EntryKind,
}

/// File bytes copied out of the object store, with libgit2's binary
/// classification.
#[derive(Debug, Clone)]
pub struct BlobData {
    pub bytes: Vec<u8>,
    pub is_binary: bool,
}

/// Outcome of looking up a file name inside a navigated subtree. A miss or a
/// kind mismatch degrades the content panel, never the request.
#[derive(Debug)]
pub enum FileLookup {
    Found(BlobData),
    Missing,
    WrongKind(String),
}
