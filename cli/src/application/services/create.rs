//! VM creation: template customization and `one.template.instantiate`.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use onevm_common::{NIC_OWNER, cluster_requirement, methods};

use crate::application::ports::{GatewayConnector, TemplateFetch};
use crate::domain::{Nic, RpcValue, Template, VirtualMachine};

/// Instantiate as a running VM, not on hold.
const ON_HOLD: bool = false;

/// Apply `vm`'s overrides to `template` in place.
///
/// - Resource, cost, files, and first-disk fields are replaced only when the
///   override is non-empty.
/// - The eight context fields are always written; absent ones become empty.
/// - A non-empty cluster id replaces the scheduling requirement.
/// - A non-empty network map replaces every NIC with one per entry.
pub fn customize(template: &mut Template, vm: &VirtualMachine) {
    override_if_set(&mut template.cpu, &vm.cpu);
    override_if_set(&mut template.vcpu, &vm.vcpu);
    override_if_set(&mut template.memory, &vm.memory);
    override_if_set(&mut template.cpu_cost, &vm.cpu_cost);
    override_if_set(&mut template.memory_cost, &vm.memory_cost);
    override_if_set(&mut template.disk_cost, &vm.disk_cost);

    let ctx = &mut template.context;
    let overrides = &vm.context;
    ctx.accounts_id = Some(overrides.accounts_id.clone().unwrap_or_default());
    ctx.platform_id = Some(overrides.platform_id.clone().unwrap_or_default());
    ctx.assembly_id = Some(overrides.assembly_id.clone().unwrap_or_default());
    ctx.assemblies_id = Some(overrides.assemblies_id.clone().unwrap_or_default());
    ctx.quota_id = Some(overrides.quota_id.clone().unwrap_or_default());
    ctx.api_key = Some(overrides.api_key.clone().unwrap_or_default());
    ctx.org_id = Some(overrides.org_id.clone().unwrap_or_default());
    ctx.ssh_public_key = Some(overrides.ssh_public_key.clone().unwrap_or_default());
    override_if_set(&mut ctx.files, &vm.files);

    if let Some(disk) = template.disks.first_mut() {
        override_if_set(&mut disk.size, &vm.disk_size);
        override_if_set(&mut disk.image, &vm.image);
    }

    if !vm.cluster_id.is_empty() {
        template.sched_requirements = Some(cluster_requirement(&vm.cluster_id));
    }

    if !vm.vnets.is_empty() {
        template.nics = vm
            .vnets
            .values()
            .map(|network| Nic::owned(network, NIC_OWNER))
            .collect();
    }
}

fn override_if_set(field: &mut Option<String>, value: &str) {
    if !value.is_empty() {
        *field = Some(value.to_string());
    }
}

/// Fetch `vm.template_name`, customize it, and instantiate it as `vm.name`.
///
/// Returns the daemon's result (the new VM id). Fetch and call failures are
/// returned as produced. A template that cannot be serialized fails before
/// any call is made.
///
/// # Errors
///
/// Returns an error if the template cannot be fetched or serialized, or if
/// the instantiate call fails.
pub async fn create(
    fetch: &impl TemplateFetch,
    connector: &impl GatewayConnector,
    vm: &VirtualMachine,
) -> Result<RpcValue> {
    let mut record = fetch.fetch(&vm.template_name).await?;
    customize(&mut record.template, vm);
    let xml = record.template.to_xml()?;

    let result = connector
        .scoped_call(methods::TEMPLATE_INSTANTIATE, |auth| {
            vec![
                auth.into(),
                record.id.into(),
                vm.name.as_str().into(),
                ON_HOLD.into(),
                xml.into(),
            ]
        })
        .await?;
    tracing::info!(
        template = %record.name,
        template_id = record.id,
        vm = %vm.name,
        %result,
        "instantiated template"
    );
    Ok(result)
}
