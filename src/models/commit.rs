use git2::Oid;

/// A local branch and the commit it currently points to.
#[derive(Debug, Clone)]
pub struct Branch {
    pub name: String,
    pub tip: Oid,
}

/// One row of the history panel, produced lazily by the walker.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: Oid,
    pub summary: String,
    pub is_target: bool,
}

/// Abbreviated commit id used in links and log labels.
pub fn short_id(id: &Oid) -> String {
    let full = id.to_string();
    full[..8.min(full.len())].to_string()
}
