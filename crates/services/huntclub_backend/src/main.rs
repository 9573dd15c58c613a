// File: crates/services/huntclub_backend/src/main.rs
use axum::{routing::get, Router};
#[cfg(feature = "calendar")]
use huntclub_calendar::routes as calendar_routes;
use huntclub_common::{config_error, init_from_config, HuntclubError};
use huntclub_config::{load_config, AppConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Builds the full application: `/api` routes plus the optional API docs.
fn app(config: Arc<AppConfig>) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Hunting Club API!" }))
        .with_state(config.clone());
    #[cfg(feature = "calendar")]
    let calendar_router = calendar_routes::routes(config.clone());

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "calendar")]
        {
            router = router.merge(calendar_router);
        }
        router
    });

    #[allow(unused_mut)]
    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "calendar")]
        use huntclub_calendar::doc::CalendarApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Hunting Club API",
                version = "0.1.0",
                description = "Hunting club backend API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Huntclub", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "calendar")]
        openapi_doc.merge(CalendarApiDoc::openapi());
        info!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), HuntclubError> {
    let config = Arc::new(load_config().map_err(config_error)?);
    let _log_guard = init_from_config(config.logging.as_ref());

    let app = app(config.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
