use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::ClinicStore;
use std::sync::Arc;

/// Main entry point for the petclinic stub backend
///
/// Serves the in-memory clinic REST API under `/petclinic/api/`, seeded with the sample
/// owners, pets, vets and lookup data. Responses carry permissive CORS headers so that browser
/// clients can read the `errors` header of rejected requests.
///
/// # Environment Variables
/// - `PETCLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:9966")
/// - `RUST_LOG`: extra tracing directives
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("petclinic=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("PETCLINIC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:9966".into());

    tracing::info!("++ Starting petclinic REST on {}", rest_addr);

    let app = api_rest::router(Arc::new(ClinicStore::seeded())).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
