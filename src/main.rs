mod canvas;
mod customize;
mod error;
mod export;
mod models;
mod photo;
mod projects;
mod prompt;
mod routes;
mod variants;
mod wizard;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

use crate::projects::ProjectService;
use crate::routes::AppState;
use crate::variants::VariantService;
use crate::wizard::Wizard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let project_service = Arc::new(ProjectService::new());
    let variant_service = Arc::new(VariantService::new());
    let wizard = Arc::new(Mutex::new(Wizard::new(project_service.clone())));

    // Recent creations are shown on the mode-select screen from the start.
    wizard.lock().await.load_recent_projects().await;

    let state = AppState {
        projects: project_service,
        variants: variant_service,
        wizard,
    };

    let app = Router::new()
        .route("/api/projects", get(routes::list_projects).post(routes::create_project))
        .route(
            "/api/projects/:id",
            get(routes::get_project)
                .patch(routes::update_project)
                .delete(routes::delete_project),
        )
        .route("/api/generate", post(routes::generate_variants))
        .route("/api/variants", get(routes::list_variants).post(routes::create_variant))
        .route(
            "/api/variants/:id",
            get(routes::get_variant)
                .patch(routes::update_variant)
                .delete(routes::delete_variant),
        )
        .route("/api/variants/:id/customize", post(routes::customize_variant))
        .route("/api/catalog", get(routes::catalog))
        .route("/api/wizard", get(routes::wizard_state))
        .route("/api/wizard/mode", post(routes::wizard_select_mode))
        .route("/api/wizard/input", post(routes::wizard_input))
        .route("/api/wizard/prompt/text", post(routes::wizard_prompt_text))
        .route("/api/wizard/prompt/toggle", post(routes::wizard_prompt_toggle))
        .route("/api/wizard/prompt/clear", post(routes::wizard_prompt_clear))
        .route("/api/wizard/photo", post(routes::wizard_photo))
        .route("/api/wizard/photo/remove", post(routes::wizard_photo_remove))
        .route("/api/wizard/generate", post(routes::wizard_generate))
        .route("/api/wizard/back", post(routes::wizard_back))
        .route("/api/wizard/start-over", post(routes::wizard_start_over))
        .route("/api/wizard/variant/:index", post(routes::wizard_select_variant))
        .route("/api/wizard/customize", post(routes::wizard_customize))
        .route("/api/wizard/customize/reset", post(routes::wizard_customize_reset))
        .route("/api/wizard/customize/apply", post(routes::wizard_apply))
        .route("/api/wizard/export/open", post(routes::wizard_export_open))
        .route("/api/wizard/export/close", post(routes::wizard_export_close))
        .route("/api/wizard/export/config", post(routes::wizard_export_config))
        .route("/api/wizard/export/run", post(routes::wizard_export_run))
        .route("/api/wizard/load/:id", post(routes::wizard_load_project))
        .route("/api/wizard/notifications", get(routes::wizard_notifications))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Starting server");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
