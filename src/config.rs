//! Server configuration shared by all requests.

use std::path::PathBuf;
use std::sync::Arc;

/// Read-only settings resolved at startup.
///
/// The storage root path is the only state shared across requests;
/// repository sessions are opened per request and never stored here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory containing the bare repositories to serve.
    pub root: PathBuf,
    /// Hard cap on the size of a rendered document.
    pub max_page_bytes: usize,
}

pub type SharedConfig = Arc<AppConfig>;
