//! `onevm reboot|poweroff|undeploy|delete|resume|suspend|recover`.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use onevm_common::LifecycleAction;

use crate::app::AppContext;
use crate::application::services::lifecycle;
use crate::commands::{confirmed, with_spinner};
use crate::domain::VirtualMachine;

/// Target of an action that has a `-hard` variant.
#[derive(Args, Debug)]
pub struct HardActionArgs {
    /// VM id
    pub id: i64,
    /// Skip the graceful path (no ACPI signal to the guest)
    #[arg(long)]
    pub hard: bool,
}

/// Target of an action without a `-hard` variant.
#[derive(Args, Debug)]
pub struct ActionArgs {
    /// VM id
    pub id: i64,
}

/// Any verb by its daemon name.
#[derive(Args, Debug)]
pub struct VerbArgs {
    /// Verb exactly as the daemon names it
    #[arg(value_enum)]
    pub verb: LifecycleAction,
    /// VM id
    pub id: i64,
}

/// Pick the verb to send for `action`, honouring `--hard`.
#[must_use]
pub fn resolve(action: LifecycleAction, hard: bool) -> LifecycleAction {
    if hard {
        action.hard().unwrap_or(action)
    } else {
        action
    }
}

/// Run one `one.vm.action` verb against `id`.
///
/// # Errors
///
/// Returns an error if the prompt fails or the daemon rejects the action.
pub async fn run(app: &AppContext, action: LifecycleAction, id: i64) -> Result<ExitCode> {
    if matches!(
        action,
        LifecycleAction::Terminate | LifecycleAction::TerminateHard
    ) && !confirmed(app, &format!("Delete VM {id}?"))?
    {
        app.output.warn("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let connector = app.connector()?;
    let vm = VirtualMachine::with_id(id);
    let result = with_spinner(
        app,
        &format!("{action} VM {id}"),
        lifecycle::dispatch(&connector, &vm, action),
    )
    .await?;

    app.renderer().render_result(action.as_wire(), &result)?;
    Ok(ExitCode::SUCCESS)
}

/// Force-delete `id` through the recovery call.
///
/// # Errors
///
/// Returns an error if the prompt fails or the recovery call fails.
pub async fn recover(app: &AppContext, args: &ActionArgs) -> Result<ExitCode> {
    if !confirmed(
        app,
        &format!("Force-delete VM {}? This skips every state check.", args.id),
    )? {
        app.output.warn("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let connector = app.connector()?;
    let vm = VirtualMachine::with_id(args.id);
    let result = with_spinner(
        app,
        &format!("Recovering VM {} (delete)", args.id),
        lifecycle::recover_delete(&connector, &vm),
    )
    .await?;

    app.renderer().render_result("recover", &result)?;
    Ok(ExitCode::SUCCESS)
}
