//! Lifecycle verbs and forced recovery against a recording gateway.

#![allow(clippy::expect_used)]

use onevm_cli::application::services::lifecycle;
use onevm_cli::domain::{RpcError, RpcValue, VirtualMachine};
use onevm_common::{LifecycleAction, methods};

use crate::fakes::{AUTH, RecordingConnector};

fn expect_action(connector: &RecordingConnector, verb: &str, vm_id: i64) {
    let call = connector.only_call();
    assert_eq!(call.method, methods::VM_ACTION);
    assert_eq!(
        call.args,
        vec![RpcValue::from(AUTH), RpcValue::from(verb), RpcValue::Int(vm_id)]
    );
    assert_eq!(connector.closes(), 1);
}

#[tokio::test]
async fn dispatch_sends_every_verb_verbatim() {
    for action in LifecycleAction::ALL {
        let connector = RecordingConnector::replying(42_i64);
        let vm = VirtualMachine::with_id(42);

        let result = lifecycle::dispatch(&connector, &vm, action)
            .await
            .expect("dispatch");

        assert_eq!(result, RpcValue::Int(42));
        expect_action(&connector, action.as_wire(), 42);
    }
}

#[tokio::test]
async fn named_operations_map_to_their_verbs() {
    let vm = VirtualMachine::with_id(7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::reboot(&connector, &vm).await.expect("reboot");
    expect_action(&connector, "reboot", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::poweroff(&connector, &vm).await.expect("poweroff");
    expect_action(&connector, "poweroff", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::resume(&connector, &vm).await.expect("resume");
    expect_action(&connector, "resume", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::delete(&connector, &vm).await.expect("delete");
    expect_action(&connector, "terminate", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::suspend(&connector, &vm).await.expect("suspend");
    expect_action(&connector, "suspend", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::undeploy(&connector, &vm).await.expect("undeploy");
    expect_action(&connector, "undeploy", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::undeploy_hard(&connector, &vm).await.expect("undeploy-hard");
    expect_action(&connector, "undeploy-hard", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::poweroff_hard(&connector, &vm).await.expect("poweroff-hard");
    expect_action(&connector, "poweroff-hard", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::reboot_hard(&connector, &vm).await.expect("reboot-hard");
    expect_action(&connector, "reboot-hard", 7);

    let connector = RecordingConnector::replying(7_i64);
    lifecycle::terminate_hard(&connector, &vm).await.expect("terminate-hard");
    expect_action(&connector, "terminate-hard", 7);
}

#[tokio::test]
async fn rejected_action_surfaces_daemon_error_and_closes() {
    let connector = RecordingConnector::faulting(2048, "[one.vm.action] Wrong state to perform action");
    let vm = VirtualMachine::with_id(3);

    let err = lifecycle::resume(&connector, &vm).await.expect_err("rejected");

    match err.downcast_ref::<RpcError>() {
        Some(RpcError::Fault { code, message, .. }) => {
            assert_eq!(*code, 2048);
            assert!(message.contains("Wrong state"));
        }
        other => panic!("expected fault, got {other:?}"),
    }
    assert_eq!(connector.closes(), 1);
}

#[tokio::test]
async fn recover_delete_always_sends_force_delete_code() {
    let connector = RecordingConnector::replying(12_i64);
    let vm = VirtualMachine::with_id(12);

    lifecycle::recover_delete(&connector, &vm).await.expect("recover");

    let call = connector.only_call();
    assert_eq!(call.method, methods::VM_RECOVER);
    assert_eq!(
        call.args,
        vec![RpcValue::from(AUTH), RpcValue::Int(12), RpcValue::Int(3)]
    );
    assert_eq!(connector.closes(), 1);
}

#[tokio::test]
async fn recover_delete_failure_still_closes() {
    let connector = RecordingConnector::faulting(1, "not authorized");
    let vm = VirtualMachine::with_id(12);

    assert!(lifecycle::recover_delete(&connector, &vm).await.is_err());
    assert_eq!(connector.connects(), 1);
    assert_eq!(connector.closes(), 1);
}
