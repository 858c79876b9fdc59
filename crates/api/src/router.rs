use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{delete, get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use services::{AppServices, CategoryService, QuestionService, QuizService};

use crate::handlers;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionService>,
    pub categories: Arc<CategoryService>,
    pub quizzes: Arc<QuizService>,
}

impl AppState {
    #[must_use]
    pub fn new(services: &AppServices) -> Self {
        Self {
            questions: services.questions(),
            categories: services.categories(),
            quizzes: services.quizzes(),
        }
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

/// Build the HTTP router over `services`.
pub fn router(services: &AppServices) -> Router {
    Router::new()
        .route(
            "/categories",
            get(handlers::get_categories).fallback(handlers::method_not_allowed),
        )
        .route(
            "/categories/:id/questions",
            get(handlers::list_category_questions).fallback(handlers::method_not_allowed),
        )
        .route(
            "/questions",
            get(handlers::list_questions)
                .post(handlers::search_or_create)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/questions/:id",
            delete(handlers::delete_question).fallback(handlers::method_not_allowed),
        )
        .route(
            "/quizzes",
            post(handlers::next_quiz_question).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(AppState::new(services))
}

/// Serve the API on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns the underlying I/O error if the server stops unexpectedly.
pub async fn serve<F>(
    listener: TcpListener,
    services: &AppServices,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "trivia api listening");
    }
    axum::serve(listener, router(services))
        .with_graceful_shutdown(shutdown)
        .await
}
