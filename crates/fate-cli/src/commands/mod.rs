pub mod play;
pub mod roll;

use fate_oracle::OracleConfig;

/// Oracle configuration from the environment, with the CLI model override.
pub fn oracle_config(model: Option<String>) -> OracleConfig {
    let config = OracleConfig::from_env();
    match model {
        Some(model) => config.with_model(model),
        None => config,
    }
}

/// Build the async runtime that carries fortune requests.
fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("runtime error: {e}"))
}
