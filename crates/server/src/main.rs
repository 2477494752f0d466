mod auth;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{config::Config, doc::ApiDoc, state::AppState, utils::shutdown::shutdown_signal};
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use std::error::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let db = create_connection(&config.database_url).await?;

    if config.run_migrations {
        info!("Applying pending migrations");
        Migrator::up(&db, None).await?;
    }

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(config.oidc_issuer_url.as_str())
        .build()
        .await
        .map_err(|err| format!("Failed to build OAuth2ResourceServer: {err:?}"))?;

    let bind_addr = config.bind_addr;
    info!(
        "Serving semester {:?}, showing {} upcoming items",
        config.current_semester.as_str(),
        config.upcoming_limit
    );
    let state = AppState::new(db, config);

    let protected = routes::protected_routes()
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::public_routes())
        .merge(protected)
        .split_for_parts();

    let app = router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CompressionLayer::new())
        .with_state(state);

    let listener = TcpListener::bind(bind_addr).await?;
    info!("Running axum on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
