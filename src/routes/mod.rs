//! HTTP route registration - maps endpoints to page composition.
//!
//! - `browse`: the repository index and the four-panel browse view

pub mod browse;

use axum::Router;

use crate::config::SharedConfig;

pub fn create_router(config: SharedConfig) -> Router {
    Router::new().merge(browse::routes(config))
}
