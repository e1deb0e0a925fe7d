//! `create` against fake ports: what reaches the wire and gateway hygiene.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;

use onevm_cli::application::services::create;
use onevm_cli::domain::{ContextOverrides, Disk, Nic, RpcValue, Template, VirtualMachine};
use onevm_common::methods;

use crate::fakes::{AUTH, CannedTemplates, RecordingConnector};

fn registered() -> Template {
    Template {
        cpu: Some("1".to_string()),
        memory: Some("512".to_string()),
        disks: vec![Disk {
            image: Some("debian-12".to_string()),
            ..Disk::default()
        }],
        nics: vec![
            Nic::owned("public", "oneadmin"),
            Nic::owned("private", "oneadmin"),
        ],
        ..Template::default()
    }
}

fn request() -> VirtualMachine {
    VirtualMachine {
        name: "web-1".to_string(),
        template_name: "debian".to_string(),
        cpu: "2".to_string(),
        memory: String::new(),
        vnets: BTreeMap::from([("eth0".to_string(), "net-1".to_string())]),
        context: ContextOverrides {
            org_id: Some("org-9".to_string()),
            ..ContextOverrides::default()
        },
        ..VirtualMachine::default()
    }
}

fn submitted_template(args: &[RpcValue]) -> Template {
    let xml = args[4].as_str().expect("template markup");
    Template::from_xml(xml).expect("submitted markup parses")
}

#[tokio::test]
async fn create_submits_customized_template() {
    let fetch = CannedTemplates::with(17, "debian", registered());
    let connector = RecordingConnector::replying(231_i64);

    let result = create::create(&fetch, &connector, &request())
        .await
        .expect("create");

    assert_eq!(result, RpcValue::Int(231));
    let call = connector.only_call();
    assert_eq!(call.method, methods::TEMPLATE_INSTANTIATE);
    assert_eq!(call.args.len(), 5);
    assert_eq!(call.args[0], RpcValue::from(AUTH));
    assert_eq!(call.args[1], RpcValue::Int(17));
    assert_eq!(call.args[2], RpcValue::from("web-1"));
    assert_eq!(call.args[3], RpcValue::Bool(false));

    let sent = submitted_template(&call.args);
    assert_eq!(sent.cpu.as_deref(), Some("2"));
    assert_eq!(sent.memory.as_deref(), Some("512"), "empty override keeps default");
    assert_eq!(sent.nics, vec![Nic::owned("net-1", "oneadmin")]);
    assert_eq!(sent.context.org_id.as_deref(), Some("org-9"));
    assert_eq!(sent.disks[0].image.as_deref(), Some("debian-12"));
}

#[tokio::test]
async fn create_with_cluster_pins_scheduling() {
    let fetch = CannedTemplates::with(1, "debian", registered());
    let connector = RecordingConnector::replying(5_i64);
    let vm = VirtualMachine {
        cluster_id: "100".to_string(),
        ..request()
    };

    create::create(&fetch, &connector, &vm).await.expect("create");

    let sent = submitted_template(&connector.only_call().args);
    assert_eq!(sent.sched_requirements.as_deref(), Some("CLUSTER_ID=\"100\""));
}

#[tokio::test]
async fn create_keeps_registered_sub_attributes_it_does_not_override() {
    let registered = Template::from_xml(
        "<TEMPLATE><CPU>1</CPU><MEMORY>512</MEMORY>\
         <CONTEXT><NETWORK>YES</NETWORK><START_SCRIPT>setup.sh</START_SCRIPT></CONTEXT>\
         <DISK><IMAGE>debian</IMAGE><DEV_PREFIX>vd</DEV_PREFIX></DISK>\
         <NIC><NETWORK>public</NETWORK><MODEL>virtio</MODEL></NIC>\
         <GRAPHICS><TYPE>VNC</TYPE></GRAPHICS></TEMPLATE>",
    )
    .expect("registered template");
    let fetch = CannedTemplates::with(2, "debian", registered);
    let connector = RecordingConnector::replying(40_i64);
    let vm = VirtualMachine {
        name: "web-2".to_string(),
        template_name: "debian".to_string(),
        cpu: "2".to_string(),
        ..VirtualMachine::default()
    };

    create::create(&fetch, &connector, &vm).await.expect("create");

    let call = connector.only_call();
    let xml = call.args[4].as_str().expect("template markup");
    for kept in [
        "<START_SCRIPT>setup.sh</START_SCRIPT>",
        "<DEV_PREFIX>vd</DEV_PREFIX>",
        "<MODEL>virtio</MODEL>",
        "<GRAPHICS><TYPE>VNC</TYPE></GRAPHICS>",
    ] {
        assert!(xml.contains(kept), "{kept} missing from {xml}");
    }
    let sent = submitted_template(&call.args);
    assert_eq!(sent.cpu.as_deref(), Some("2"));
    assert_eq!(sent.memory.as_deref(), Some("512"));
    assert_eq!(sent.nics[0].network.as_deref(), Some("public"));
}

#[tokio::test]
async fn create_fetch_failure_is_returned_verbatim_without_a_call() {
    let fetch = CannedTemplates::failing("[one.templatepool.info] User couldn't be authenticated");
    let connector = RecordingConnector::replying(0_i64);

    let err = create::create(&fetch, &connector, &request())
        .await
        .expect_err("fetch fails");

    assert_eq!(
        err.to_string(),
        "[one.templatepool.info] User couldn't be authenticated"
    );
    assert_eq!(connector.connects(), 0);
    assert!(connector.calls().is_empty());
}

#[tokio::test]
async fn create_closes_gateway_after_success() {
    let fetch = CannedTemplates::with(1, "debian", registered());
    let connector = RecordingConnector::replying(9_i64);

    create::create(&fetch, &connector, &request()).await.expect("create");

    assert_eq!(connector.connects(), 1);
    assert_eq!(connector.closes(), 1);
}

#[tokio::test]
async fn create_closes_gateway_after_fault() {
    let fetch = CannedTemplates::with(1, "debian", registered());
    let connector = RecordingConnector::faulting(8192, "[one.template.instantiate] quota exceeded");

    let err = create::create(&fetch, &connector, &request())
        .await
        .expect_err("fault");

    assert!(err.to_string().contains("quota exceeded"), "got: {err}");
    assert_eq!(connector.connects(), 1);
    assert_eq!(connector.closes(), 1);
}
