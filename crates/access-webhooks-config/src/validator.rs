//! Configuration validation.

use std::fmt;
use std::path::Path;

use crate::loader::ConfigLoader;
use crate::schema::Config;

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The tool cannot run with this value.
    Error,
    /// Works, but is probably not what the operator wants.
    Warning,
}

/// One finding against a config key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted key, e.g. `registry.host`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Findings in the order they were checked.
#[derive(Debug, Default)]
pub struct ValidationResult {
    issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.by_severity(Severity::Warning)
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    fn push(&mut self, severity: Severity, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity,
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.push(Severity::Error, path, message);
    }

    fn warning(&mut self, path: &str, message: impl Into<String>) {
        self.push(Severity::Warning, path, message);
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_host(config, &mut result);
        Self::validate_credentials(config, &mut result);
        Self::validate_transport(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_host(config: &Config, result: &mut ValidationResult) {
        let host = config.registry.host.trim();
        if host.is_empty() {
            result.error(
                "registry.host",
                "Host is required (set it in the config file, --host or ACCESS_WEBHOOKS_HOST)",
            );
            return;
        }

        match url::Url::parse(host) {
            Ok(url) => match url.scheme() {
                "https" => {}
                "http" => result.warning(
                    "registry.host",
                    "Plain http sends the bearer token unencrypted",
                ),
                other => result.error(
                    "registry.host",
                    format!("Unsupported scheme '{}', expected https", other),
                ),
            },
            Err(e) => result.error("registry.host", format!("Invalid URL '{}': {}", host, e)),
        }
    }

    fn validate_credentials(config: &Config, result: &mut ValidationResult) {
        let missing = config
            .registry
            .token
            .as_deref()
            .map_or(true, |t| t.trim().is_empty());
        if missing {
            result.error(
                "registry.token",
                "API token is required (set it in the config file, --token or ACCESS_WEBHOOKS_TOKEN)",
            );
        }
    }

    fn validate_transport(config: &Config, result: &mut ValidationResult) {
        let registry = &config.registry;

        if registry.timeout_seconds == 0 {
            result.error("registry.timeout_seconds", "timeout_seconds must be greater than 0");
        } else if registry.timeout_seconds > 300 {
            result.warning(
                "registry.timeout_seconds",
                "timeout_seconds is very high (>300), commands may hang for minutes",
            );
        }

        if registry.accept_invalid_certs {
            result.warning(
                "registry.accept_invalid_certs",
                "Certificate verification is disabled; prefer ca_cert for self-signed controllers",
            );
        }

        if let Some(ref ca_cert) = registry.ca_cert {
            let expanded = ConfigLoader::expand_path(ca_cert);
            if !Path::new(&expanded).is_file() {
                result.error(
                    "registry.ca_cert",
                    format!("CA certificate file does not exist: {}", expanded),
                );
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.error("logging.level", "Log level cannot be empty");
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
