//! VM lifecycle operations: the `one.vm.action` verbs and forced recovery.
//!
//! None of these inspect the VM's current state first. The daemon owns the
//! state machine and reports an illegal transition as a call failure.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use onevm_common::{LifecycleAction, methods, recover};

use crate::application::ports::GatewayConnector;
use crate::domain::{RpcValue, VirtualMachine};

/// Submit `action(auth, verb, vm_id)` for `vm`.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn dispatch(
    connector: &impl GatewayConnector,
    vm: &VirtualMachine,
    action: LifecycleAction,
) -> Result<RpcValue> {
    let result = connector
        .scoped_call(methods::VM_ACTION, |auth| {
            vec![auth.into(), action.as_wire().into(), vm.vm_id.into()]
        })
        .await?;
    tracing::info!(vm_id = vm.vm_id, %action, "lifecycle action accepted");
    Ok(result)
}

/// Reboot the guest OS.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn reboot(connector: &impl GatewayConnector, vm: &VirtualMachine) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::Reboot).await
}

/// Power off through ACPI.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn poweroff(connector: &impl GatewayConnector, vm: &VirtualMachine) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::Poweroff).await
}

/// Resume a stopped, suspended, undeployed or powered-off VM.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn resume(connector: &impl GatewayConnector, vm: &VirtualMachine) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::Resume).await
}

/// Gracefully terminate.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn delete(connector: &impl GatewayConnector, vm: &VirtualMachine) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::Terminate).await
}

/// Suspend, keeping memory state on the host.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn suspend(connector: &impl GatewayConnector, vm: &VirtualMachine) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::Suspend).await
}

/// Shut down and move disks back to the system datastore.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn undeploy(connector: &impl GatewayConnector, vm: &VirtualMachine) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::Undeploy).await
}

/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn undeploy_hard(
    connector: &impl GatewayConnector,
    vm: &VirtualMachine,
) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::UndeployHard).await
}

/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn poweroff_hard(
    connector: &impl GatewayConnector,
    vm: &VirtualMachine,
) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::PoweroffHard).await
}

/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn reboot_hard(
    connector: &impl GatewayConnector,
    vm: &VirtualMachine,
) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::RebootHard).await
}

/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn terminate_hard(
    connector: &impl GatewayConnector,
    vm: &VirtualMachine,
) -> Result<RpcValue> {
    dispatch(connector, vm, LifecycleAction::TerminateHard).await
}

/// Force-delete `vm` whatever state it is in, bypassing the action graph.
///
/// Works when `terminate` and `terminate-hard` are rejected.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn recover_delete(
    connector: &impl GatewayConnector,
    vm: &VirtualMachine,
) -> Result<RpcValue> {
    let result = connector
        .scoped_call(methods::VM_RECOVER, |auth| {
            vec![auth.into(), vm.vm_id.into(), recover::FORCE_DELETE.into()]
        })
        .await?;
    tracing::info!(vm_id = vm.vm_id, "forced delete accepted");
    Ok(result)
}
