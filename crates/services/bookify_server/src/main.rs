// File: crates/services/bookify_server/src/main.rs
use axum::{routing::get, Json, Router};
#[cfg(feature = "assistant")]
use bookify_assistant::routes as assistant_routes;
use bookify_config::load_config;
#[cfg(feature = "gcal")]
use bookify_gcal::routes as gcal_routes;
use bookify_server::pages;
use bookify_server::service_factory::BookifyServiceFactory;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

#[cfg(feature = "mailer")]
use bookify_common::services::ServiceFactory;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    bookify_common::logging::init();

    #[allow(unused_variables)] // consumed only by the feature blocks below
    let factory = BookifyServiceFactory::new(config.clone()).await;

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Bookify API!" }))
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .with_state(config.clone());

    #[cfg(feature = "assistant")]
    let assistant_router = if bookify_common::is_assistant_enabled(&config) {
        Some(assistant_routes::routes(config.clone()))
    } else {
        tracing::info!("Assistant disabled via runtime config.");
        None
    };

    #[cfg(feature = "gcal")]
    let gcal_router = if bookify_common::is_gcal_enabled(&config) {
        #[cfg(feature = "mailer")]
        let mailer = factory.notification_service();
        #[cfg(not(feature = "mailer"))]
        let mailer = None;
        Some(gcal_routes::routes(config.clone(), mailer).await)
    } else {
        tracing::info!("Calendar booking disabled via runtime config.");
        None
    };

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "gcal")]
        {
            if let Some(gcal_router) = gcal_router {
                router = router.merge(gcal_router);
            }
        }
        #[cfg(feature = "assistant")]
        {
            if let Some(assistant_router) = assistant_router {
                router = router.merge(assistant_router);
            }
        }
        router
    });

    #[allow(unused_mut)] // mutated by the openapi and debug blocks
    let mut app = api_router
        .route("/", get(pages::chatbot_page))
        .route("/chatbot_success", get(pages::chatbot_success_page));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "assistant")]
        use bookify_assistant::doc::AssistantApiDoc;
        #[cfg(feature = "gcal")]
        use bookify_gcal::doc::GcalApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bookify API",
                version = "0.1.0",
                description = "Appointment booking service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Bookify", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        // Create the merged OpenAPI document
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "gcal")]
        openapi_doc.merge(GcalApiDoc::openapi());
        #[cfg(feature = "assistant")]
        openapi_doc.merge(AssistantApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        // Create the Swagger UI route, referencing the merged doc
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        // Merge the Swagger UI into the main app router
        app = app.merge(swagger_ui);
    }

    // Serve static files in dev mode
    if cfg!(debug_assertions) {
        println!("Running in development mode, serving static files from ./static");

        let static_router = Router::new().nest_service("/static", ServeDir::new("static"));
        app = app.merge(static_router);
    }

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
