//! Parameter entry page.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::state::SharedState;
use crate::templates::PageContext;

pub async fn enter_parameters(State(state): State<SharedState>) -> Response {
    let ctx = PageContext::defaults(&state.assets);
    match state.templates.render_page(&ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render entry page: {e}");
            crate::error::AppError::from(e).into_response_with(state.debug)
        }
    }
}
