//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that URLs and contract addresses parse
//! - Validate value ranges (timeouts > 0, confirmations > 0)
//! - Check deployment entries (unique names, known Solidity types)
//!
//! Returns all validation errors, not just the first.

use alloy::dyn_abi::DynSolType;
use alloy::primitives::Address;
use std::collections::HashSet;
use std::fmt;

use crate::config::schema::ScriptsConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ScriptsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.chain.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new("chain.rpc_url", e.to_string()));
    }
    for (i, failover) in config.chain.failover_urls.iter().enumerate() {
        if let Err(e) = failover.parse::<url::Url>() {
            errors.push(ValidationError::new(
                format!("chain.failover_urls[{}]", i),
                e.to_string(),
            ));
        }
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chain.rpc_timeout_secs", "must be > 0"));
    }
    if config.chain.confirmation_blocks == 0 {
        errors.push(ValidationError::new("chain.confirmation_blocks", "must be > 0"));
    }
    if config.chain.confirmation_poll_ms == 0 {
        errors.push(ValidationError::new("chain.confirmation_poll_ms", "must be > 0"));
    }

    let contracts = [
        ("contracts.main_nft", &config.contracts.main_nft),
        ("contracts.subscriptions", &config.contracts.subscriptions),
        ("contracts.public_donation", &config.contracts.public_donation),
    ];
    for (field, value) in contracts {
        if !value.is_empty() && value.parse::<Address>().is_err() {
            errors.push(ValidationError::new(field, format!("invalid address '{}'", value)));
        }
    }

    if config.events.tail == 0 {
        errors.push(ValidationError::new("events.tail", "must be > 0"));
    }

    if let Err(e) = config.explorer.api_url.parse::<url::Url>() {
        errors.push(ValidationError::new("explorer.api_url", e.to_string()));
    }

    let mut names = HashSet::new();
    for (i, deployment) in config.deployments.iter().enumerate() {
        let prefix = format!("deployments[{}]", i);
        if deployment.name.is_empty() {
            errors.push(ValidationError::new(format!("{}.name", prefix), "must not be empty"));
        } else if !names.insert(deployment.name.to_ascii_lowercase()) {
            errors.push(ValidationError::new(
                format!("{}.name", prefix),
                format!("duplicate deployment '{}'", deployment.name),
            ));
        }
        if deployment.artifact.is_empty() {
            errors.push(ValidationError::new(format!("{}.artifact", prefix), "must not be empty"));
        }
        if deployment.confirmations == 0 {
            errors.push(ValidationError::new(format!("{}.confirmations", prefix), "must be > 0"));
        }
        for (j, arg) in deployment.constructor_args.iter().enumerate() {
            if let Err(e) = DynSolType::parse(&arg.ty) {
                errors.push(ValidationError::new(
                    format!("{}.constructor_args[{}].type", prefix, j),
                    e.to_string(),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ConstructorArg, DeploymentConfig};

    fn deployment(name: &str) -> DeploymentConfig {
        DeploymentConfig {
            name: name.to_string(),
            artifact: "artifacts/X.json".to_string(),
            constructor_args: Vec::new(),
            confirmations: 6,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ScriptsConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ScriptsConfig::default();
        config.chain.rpc_url = "not a url".to_string();
        config.chain.confirmation_blocks = 0;
        config.contracts.subscriptions = "0x1234".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["chain.rpc_url", "chain.confirmation_blocks", "contracts.subscriptions"]
        );
    }

    #[test]
    fn test_duplicate_deployment_names() {
        let mut config = ScriptsConfig::default();
        config.deployments = vec![deployment("Events"), deployment("events")];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("duplicate"));
    }

    #[test]
    fn test_unknown_constructor_type() {
        let mut config = ScriptsConfig::default();
        let mut d = deployment("MainNFT");
        d.constructor_args.push(ConstructorArg {
            ty: "uint257".to_string(),
            value: "1".to_string(),
        });
        config.deployments.push(d);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "deployments[0].constructor_args[0].type");
    }
}
