//! HTTP surface: the three relay endpoints plus the form page and health check.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, State, rejection::FormRejection},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::llm::LlmProvider;
use crate::relay::{RelayEnvelope, RelayHandler, RelayTask};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: RelayHandler,
}

/// Build the Axum router. One POST route per [`RelayTask`], all served by the
/// same handler.
pub fn relay_routes(llm: Arc<dyn LlmProvider>) -> Router {
    let state = AppState {
        relay: RelayHandler::new(llm),
    };

    let mut router: Router<AppState> = Router::new()
        .route("/", get(index))
        .route("/health", get(health));

    for task in RelayTask::ALL {
        router = router.route(
            task.path(),
            post(
                move |state: State<AppState>,
                      form: Result<Form<HashMap<String, String>>, FormRejection>| {
                    relay_endpoint(task, state, form)
                },
            ),
        );
    }

    // Pasted inboxes can be arbitrarily large; no body cap is applied.
    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::disable()),
    )
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "inbox-triage",
        "model": state.relay.model_name(),
    }))
}

async fn relay_endpoint(
    task: RelayTask,
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> RelayEnvelope {
    // An unreadable body carries no usable field.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(task = task.name(), %rejection, "Form body rejected");
            HashMap::new()
        }
    };

    state.relay.handle(task, &form).await
}
