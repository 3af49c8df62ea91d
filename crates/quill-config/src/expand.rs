//! Environment variable expansion for configuration strings.
//!
//! Supported forms:
//! - `${VAR}` - expands to the value of `VAR`, errors if unset
//! - `${VAR:-default}` - expands to `VAR` if set, otherwise the default

use crate::ConfigError;

/// Expand `${VAR}` references in a configuration value.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find('}') else {
            // Unterminated reference stays literal.
            result.push_str(&rest[start..]);
            return Ok(result);
        };
        result.push_str(&resolve(&after_open[..end], field)?);
        rest = &after_open[end + 1..];
    }

    result.push_str(rest);
    Ok(result)
}

/// Resolve one `VAR` or `VAR:-default` reference.
fn resolve(reference: &str, field: &str) -> Result<String, ConfigError> {
    let (name, default) = match reference.split_once(":-") {
        Some((name, default)) => (name, Some(default)),
        None => (reference, None),
    };

    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(_) => default.map(ToOwned::to_owned).ok_or_else(|| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        }),
    }
}
