//! `${VAR}` expansion for configuration strings.
//!
//! Credentials usually live in CI secrets, so the config file refers to them
//! as `${CONFLUENCE_TOKEN}` instead of storing them.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Only braced references are expanded. Any other `$`, including bare `$VAR`
/// and an unterminated `${`, is copied literally so tokens containing `$`
/// survive unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}').map(|end| end + 1) else {
            break;
        };
        output.push_str(&rest[..start]);
        output.push_str(&expand_reference(&rest[start..start + len], field)?);
        rest = &rest[start + len..];
    }
    output.push_str(rest);

    Ok(output)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional field in place.
pub(crate) fn expand_field(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(current) = value.take() {
        *value = Some(expand_env(&current, field)?);
    }
    Ok(())
}

/// Lookup failure for a variable referenced without a default.
struct UnsetVar(String);
