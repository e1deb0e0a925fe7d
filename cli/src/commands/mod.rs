//! Command implementations

pub mod config;
pub mod create;
pub mod image;
pub mod lifecycle;
pub mod lookup;
pub mod version;

use std::future::Future;

use anyhow::Result;

use crate::app::AppContext;
use crate::output::progress;

/// Await `call` behind a spinner when the terminal can show one.
pub(crate) async fn with_spinner<T, F>(app: &AppContext, msg: &str, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if !app.output.show_progress() || app.is_json() {
        return call.await;
    }
    let pb = progress::spinner(msg);
    let result = call.await;
    match &result {
        Ok(_) => progress::finish_ok(&pb, msg),
        Err(_) => progress::finish_err(&pb),
    }
    result
}

/// Whether a destructive command may go ahead: always under `--yes` or CI,
/// otherwise only on an explicit yes at the prompt.
///
/// # Errors
///
/// Returns an error if the prompt cannot be shown.
pub(crate) fn confirmed(app: &AppContext, prompt: &str) -> Result<bool> {
    Ok(app.non_interactive || app.confirm(prompt, false)?)
}

/// Parse a `KEY=VALUE` argument.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
