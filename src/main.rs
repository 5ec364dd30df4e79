//! Resale Price Predictor — Binary Entrypoint
//! Boots the Axum HTTP server: config, model handle, routes.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    resale_price_predictor::debug::init_dev_tracing();

    // Model and tables are loaded once here and shared read-only afterwards.
    let router = resale_price_predictor::app()
        .await
        .map_err(shuttle_runtime::Error::Custom)?;

    Ok(router.into())
}
