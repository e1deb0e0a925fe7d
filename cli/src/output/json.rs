//! JSON output helpers.
//!
//! `--json` mode prints one pretty-printed object per command on stdout; a
//! failed command prints an error object there instead.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{ComputeError, ConfigError, OnevmConfig, RpcError, RpcValue, VmRecord};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable machine-readable code for a command failure.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<ComputeError>() {
        return match e {
            ComputeError::NoVm => "NO_VM",
            ComputeError::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            ComputeError::TemplateSerialization(_) => "TEMPLATE_INVALID",
            ComputeError::UnexpectedPayload { .. } => "UNEXPECTED_PAYLOAD",
        };
    }
    if let Some(e) = err.downcast_ref::<RpcError>() {
        return match e {
            RpcError::Transport { .. } | RpcError::Status { .. } => "UNREACHABLE",
            RpcError::Fault { .. } => "RPC_FAULT",
            RpcError::Encode(_) | RpcError::Decode(_) => "PROTOCOL_ERROR",
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "INVALID_CONFIG";
    }
    "COMMAND_FAILED"
}

/// Format the outcome of one daemon operation.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_result(operation: &str, result: &RpcValue) -> Result<String> {
    let obj = serde_json::json!({
        "operation": operation,
        "result": result,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

#[derive(Serialize)]
struct ConfigView<'a> {
    path: String,
    endpoint: &'a str,
    username: &'a str,
    password_set: bool,
    timeout_secs: u64,
}

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print the outcome of one daemon operation.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_result(&self, operation: &str, result: &RpcValue) -> Result<()> {
        println!("{}", format_result(operation, result)?);
        Ok(())
    }

    /// Print a VM record.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_vm(&self, vm: &VmRecord) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(vm).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Print the configuration. The password is reported as set or unset,
    /// never echoed.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &OnevmConfig, path: &Path) -> Result<()> {
        let view = ConfigView {
            path: path.display().to_string(),
            endpoint: &config.endpoint,
            username: &config.username,
            password_set: config.password.is_some(),
            timeout_secs: config.timeout_secs,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("JSON serialization failed")?
        );
        Ok(())
    }

    pub fn render_version(&self, version: &str) {
        println!(r#"{{"version":"{version}"}}"#);
    }
}
