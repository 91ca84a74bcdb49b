use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::engine::CalendarEngine;
use crate::html;
use crate::types::CalendarCell;

/// Application state shared across requests
pub struct AppState {
    pub engine: RwLock<CalendarEngine>,
}

/// Start the web server on the given port
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        engine: RwLock::new(CalendarEngine::new()),
    });

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!(addr = %addr, "server running");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/nav", get(nav_handler))
        .route("/reset", get(reset_handler))
        .route("/api/grid", get(grid_handler))
        .with_state(state)
}

/// Serve the calendar page for the current cursor
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let engine = state.engine.read().await;
    let cells = engine.grid(&mut rand::rng());
    let markup = html::render_page(&engine.month_label(), &cells);
    Html(markup.into_string())
}

#[derive(Debug, Deserialize)]
struct NavParams {
    delta: Option<String>,
}

/// Shift the displayed month and return to the calendar page.
///
/// A missing, non-integer, or out-of-range delta is a client error; the
/// cursor is left unchanged.
async fn nav_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NavParams>,
) -> Result<Redirect, (StatusCode, String)> {
    let raw = params.delta.unwrap_or_default();
    let mut engine = state.engine.write().await;

    match engine.shift_raw(&raw) {
        Ok(()) => Ok(Redirect::to("/")),
        Err(e) => {
            warn!(delta = %raw, error = %e, "rejected month navigation");
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

/// Reset the displayed month to today
async fn reset_handler(State(state): State<Arc<AppState>>) -> Redirect {
    state.engine.write().await.reset();
    Redirect::to("/")
}

#[derive(Debug, Serialize)]
struct GridResponse {
    label: String,
    cells: Vec<CalendarCell>,
}

/// Return the current grid as JSON
async fn grid_handler(State(state): State<Arc<AppState>>) -> Json<GridResponse> {
    let engine = state.engine.read().await;
    Json(GridResponse {
        label: engine.month_label(),
        cells: engine.grid(&mut rand::rng()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Clock;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn test_router() -> Router {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
        let engine = CalendarEngine::with_clock(Box::new(clock));
        router(Arc::new(AppState {
            engine: RwLock::new(engine),
        }))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_current_month() {
        let app = test_router();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("2025년 2월"));
        assert!(body.contains("aria-current=\"date\""));
    }

    #[tokio::test]
    async fn test_nav_shifts_and_redirects() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/nav?delta=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("2025년 3월"));
    }

    #[tokio::test]
    async fn test_nav_rejects_non_integer_delta() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/nav?delta=x")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Cursor must be unchanged
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("2025년 2월"));
    }

    #[tokio::test]
    async fn test_reset_returns_to_today() {
        let app = test_router();

        app.clone()
            .oneshot(
                Request::builder()
                    .uri("/nav?delta=-6")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/reset").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("2025년 2월"));
    }

    #[tokio::test]
    async fn test_api_grid_returns_42_cells() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/grid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["label"], "2025년 2월");
        assert_eq!(json["cells"].as_array().unwrap().len(), 42);
    }
}
