// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as the shape of the backend namespace prefix and known log levels.

use ferry_plugin::naming::is_identifier_path;
use ferry_plugin::to_camel;

use crate::diagnostic::ConfigError;
use crate::model::FerryConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FerryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (key, value) in [
        ("plugins.root", &config.plugins.root),
        ("plugins.family", &config.plugins.family),
    ] {
        if !is_identifier_path(value) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "{key} `{value}` must be a dot-separated identifier path such as `org.ferry`"
                ),
            });
        }
    }

    for backend in config.plugins.enabled.keys() {
        let letters_only = backend.chars().all(|c| c.is_ascii_alphabetic() || c == '_');
        if !letters_only || to_camel(backend).is_empty() {
            errors.push(ConfigError::Validation {
                message: format!(
                    "plugins.enabled key `{backend}` is not a backend identifier or segment (ASCII letters and `_` only)"
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
