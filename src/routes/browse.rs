//! Browse endpoints.
//!
//! - GET /git
//!   Lists bare repositories under the storage root, newest first.
//!
//! - GET /git/{repo}/{branch}/{commit}/{type}[/path...]
//!   Renders branches, log, tree, and content for the addressed object.
//!
//! Every reply is status 200 with an HTML body, including degraded pages;
//! failures that cannot be rendered in place fall back to the generic error
//! page. A repository session lives for exactly one request.

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};
use tracing::warn;

use crate::config::SharedConfig;
use crate::error::Result;
use crate::models::Coordinates;
use crate::render::page;

pub fn routes(config: SharedConfig) -> Router {
    Router::new()
        .route("/git", get(repo_index))
        .route("/git/{*rest}", get(browse))
        .with_state(config)
}

async fn repo_index(State(config): State<SharedConfig>) -> Result<Html<String>> {
    let doc = page::index_page(&config)
        .inspect_err(|e| warn!(root = %config.root.display(), "repository index failed: {e}"))?;
    Ok(Html(doc))
}

async fn browse(State(config): State<SharedConfig>, Path(rest): Path<String>) -> Html<String> {
    let coords = match Coordinates::decode(&rest) {
        Ok(coords) => coords,
        Err(e) => {
            warn!(%rest, "rejected request: {e}");
            return Html(page::error_page(&e.to_string()));
        }
    };

    match page::view_page(&config, &coords) {
        Ok(doc) => Html(doc),
        Err(e) => {
            warn!(
                repo = %coords.repo,
                branch = %coords.branch,
                commit = %coords.commit,
                path = %coords.path.join("/"),
                "failed to render view: {e}"
            );
            Html(page::error_page(&e.to_string()))
        }
    }
}
