//! Encode one record (JSON as the first argument, or the form defaults) and score it
//! with the configured model, printing the row and the formatted price.

use resale_price_predictor::{
    config::PredictorConfig, display::format_price, model, FeatureEncoder, RawRecord,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let _ = dotenvy::dotenv();

    let raw: RawRecord = match std::env::args().nth(1) {
        Some(json) => serde_json::from_str(&json)?,
        None => RawRecord::default(),
    };

    let cfg = PredictorConfig::from_env()?;
    let scorer = model::load_model(&cfg.model_path)?;

    match FeatureEncoder::default()
        .build_feature_row(&raw)
        .and_then(|row| model::score_row(scorer.as_ref(), &row).map(|p| (row, p)))
    {
        Ok((row, price)) => {
            println!("row: {:?}", row.values());
            println!("price: {}", format_price(price, &cfg.currency));
        }
        Err(e) => println!("error: {}", e.user_message()),
    }

    Ok(())
}
