//! `onevm lookup <name>`: resolve a VM by name.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::lookup;
use crate::commands::with_spinner;
use crate::infra::pool::PoolVmQuery;

/// Run `onevm lookup`.
///
/// # Errors
///
/// Returns [`crate::domain::ComputeError::NoVm`] when nothing matches.
pub async fn run(app: &AppContext, name: &str) -> Result<ExitCode> {
    let connector = app.connector()?;
    let query = PoolVmQuery::new(&connector);
    let vm = with_spinner(
        app,
        &format!("Looking up {name}"),
        lookup::by_name(&query, name),
    )
    .await?;
    app.renderer().render_vm(&vm)?;
    Ok(ExitCode::SUCCESS)
}
