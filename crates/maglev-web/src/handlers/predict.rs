//! Form submission → scaled features → model → re-rendered page.

use std::collections::HashMap;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use maglev_common::ParameterSet;
use tracing::{error, info};

use crate::error::AppError;
use crate::state::SharedState;
use crate::templates::{PageContext, CAPTION_RESULT};

pub async fn predict(
    State(state): State<SharedState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    match run_prediction(&state, form).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Prediction failed: {e}");
            e.into_response_with(state.debug)
        }
    }
}

async fn run_prediction(
    state: &SharedState,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<String, AppError> {
    let Form(fields) = form?;
    let params = ParameterSet::from_form(&fields)?;

    let predictor = state.predictor.clone();
    let prediction = tokio::task::spawn_blocking(move || predictor.predict(&params)).await??;
    info!("F = {} for J = {}, J_1 = {}", prediction.force, params.j, params.j1);

    let ctx = PageContext::new(
        CAPTION_RESULT,
        &prediction.parameters,
        prediction.force,
        &prediction.arrows,
        &state.assets,
    );
    Ok(state.templates.render_page(&ctx)?)
}
