pub mod predictor;

pub use predictor::PredictorConfig;
