//! Promoted-listing feed handler.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::error::Result;
use crate::services::feed::FeedService;
use crate::state::AppState;

/// `GET /feed/promoted` - the full CSV merchant feed.
pub async fn promoted(State(state): State<AppState>) -> Result<Response> {
    let csv = FeedService::new(state.store())
        .promoted_csv(&state.config().base_url)
        .await?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                CONTENT_DISPOSITION,
                "attachment; filename=\"product_feed.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
