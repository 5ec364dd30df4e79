//! Dev-only tracing setup and anonymized submission ids.

use sha2::{Digest, Sha256};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "PREDICTOR_DEV_LOG";

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - PREDICTOR_DEV_LOG=1
///
/// Returns whether a subscriber was installed by this call.
pub fn init_dev_tracing() -> bool {
    let dev_flag = std::env::var(ENV_DEV_LOG).is_ok_and(|v| v.trim() == "1");
    let is_dev_env = cfg!(debug_assertions)
        || std::env::var("SHUTTLE_ENV").is_ok_and(|env| {
            ["local", "development", "dev"]
                .iter()
                .any(|d| env.eq_ignore_ascii_case(d))
        });

    if !(dev_flag && is_dev_env) {
        return false;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("predict=info,features=info,model=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .is_ok()
}

/// Short stable id for a piece of user input, so logs never carry it verbatim:
/// the first 6 bytes of its SHA-256, hex encoded.
pub fn anon_hash(text: &str) -> String {
    Sha256::digest(text.as_bytes())[..6]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
