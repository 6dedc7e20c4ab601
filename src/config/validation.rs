use crate::config::types::{AuditConfig, Config, DiscoveryConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_discovery_config(&config.discovery)?;
    validate_user_agent_config(&config.user_agent)?;
    if let Some(audit) = &config.audit {
        validate_audit_config(audit)?;
    }
    if let Some(output) = &config.output {
        validate_output_config(output)?;
    }
    Ok(())
}

/// Validates discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 120, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 64 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 64, got {}",
            config.max_concurrent_requests
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.http.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.http cannot be empty".to_string(),
        ));
    }

    if config.robots.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.robots cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates audit engine configuration
fn validate_audit_config(config: &AuditConfig) -> Result<(), ConfigError> {
    if config.command.trim().is_empty() {
        return Err(ConfigError::Validation(
            "audit.command cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 3600 {
        return Err(ConfigError::Validation(format!(
            "audit.timeout_secs must be between 1 and 3600, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "results_directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
