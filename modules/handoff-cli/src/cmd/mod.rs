pub mod board;
pub mod checkout;
pub mod directory;
pub mod service;

use std::path::Path;

use anyhow::{bail, Result};
use cloud_estimate::CostEstimator;

/// Parse `key=value`. The value may itself contain `=`.
pub fn parse_param(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("expected key=value, got {raw:?}"),
    }
}

pub fn estimate(config: Option<&Path>) -> Result<()> {
    let estimator = match config {
        Some(path) => CostEstimator::load(path)?,
        None => CostEstimator::default(),
    };
    println!("{}", cloud_estimate::render(&estimator));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_splits_on_first_equals() {
        assert_eq!(
            parse_param("address=Denver").unwrap(),
            ("address".to_string(), "Denver".to_string())
        );
        assert_eq!(
            parse_param("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_param("empty=").unwrap().1, "");
    }

    #[test]
    fn param_without_key_is_rejected() {
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }
}
