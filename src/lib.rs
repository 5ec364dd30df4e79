// src/lib.rs
// Public library surface for the service binary, the demo bin and integration tests.

pub mod api;
pub mod config;
pub mod debug;
pub mod display;
pub mod error;
pub mod features;
pub mod form;
pub mod metrics;
pub mod model;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::error::{PredictError, PredictResult};
pub use crate::features::{build_feature_row, FeatureEncoder, FeatureRow};
pub use crate::form::RawRecord;

use axum::Router;
use tracing::info;

use crate::config::PredictorConfig;

/// Build the full application from environment and config files:
/// loads the model once, wires routes, and mounts `/metrics` when
/// `DEBUG_ROUTES=1`.
pub async fn app() -> anyhow::Result<Router> {
    let cfg = PredictorConfig::from_env()?;
    let model = model::load_model(&cfg.model_path)?;
    info!(
        model = model.name(),
        static_dir = %cfg.static_dir.display(),
        debug_echo = cfg.debug_echo,
        "predictor configured"
    );

    let state = AppState::new(FeatureEncoder::default(), model, cfg);
    let mut router = api::create_router(state);

    if std::env::var("DEBUG_ROUTES").ok().as_deref() == Some("1") {
        let m = metrics::Metrics::init()?;
        router = router.merge(m.router());
    }

    Ok(router)
}
