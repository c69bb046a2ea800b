//! Request handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use super::AppState;
use crate::extraction::errors::ScrapeError;
use crate::pipeline::request::{SearchRequest, validate_keyword};
use crate::pipeline::response::{ErrorEnvelope, assemble_fatal, assemble_success};
use crate::session::SessionLauncher;

/// `POST /api/scrape`
pub(super) async fn handle_scrape<L: SessionLauncher + 'static>(
    State(state): State<Arc<AppState<L>>>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let raw_keyword = match body {
        Ok(Json(request)) => request.keyword,
        Err(rejection) => {
            warn!("Rejected request body: {rejection}");
            None
        }
    };

    let keyword = match validate_keyword(raw_keyword.as_deref()) {
        Ok(keyword) => keyword,
        Err(ScrapeError::InvalidInput(message)) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorEnvelope::message(message))).into_response();
        }
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorEnvelope::message(e.to_string())))
                .into_response();
        }
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("scrape", %request_id, keyword = %keyword);

    let task_state = Arc::clone(&state);
    let task_keyword = keyword.clone();
    let mut task = tokio::spawn(
        async move {
            info!(
                stage = "policy",
                environment = task_state.runtime.environment_label(),
                "Request accepted"
            );
            task_state.policy.resolve(&task_keyword, &task_state.runtime).await
        }
        .instrument(span.clone()),
    );

    // On timeout the task keeps running so its browser session still closes.
    let failure = match tokio::time::timeout(state.request_timeout, &mut task).await {
        Ok(Ok(resolution)) => {
            let envelope = span.in_scope(|| assemble_success(resolution, &keyword, &state.runtime));
            return Json(envelope).into_response();
        }
        Ok(Err(join_error)) => {
            ScrapeError::FatalAssemblyFailure(format!("pipeline task failed: {join_error}"))
        }
        Err(_) => ScrapeError::FatalAssemblyFailure(format!(
            "request exceeded its {}s budget",
            state.request_timeout.as_secs()
        )),
    };

    span.in_scope(|| {
        error!(stage = "assemble", kind = %failure.kind(), "Fatal request failure: {failure}");
    });
    let envelope = assemble_fatal(Some(&keyword), &failure.to_string(), state.expose_debug);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
}
