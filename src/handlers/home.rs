//! Landing page

use axum::{extract::State, response::Html};

use crate::{AppError, AppResult, AppState};

/// Serve the landing page template as-is
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = tokio::fs::read_to_string(&state.config.template_path)
        .await
        .map_err(|e| AppError::Internal(format!("cannot read {}: {}", state.config.template_path, e)))?;

    Ok(Html(page))
}
