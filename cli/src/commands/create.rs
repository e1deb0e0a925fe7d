//! `onevm create`: instantiate a template with per-VM overrides.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use onevm_common::context_keys;

use crate::app::AppContext;
use crate::application::services::create;
use crate::commands::{parse_key_val, with_spinner};
use crate::domain::{ContextOverrides, VirtualMachine};
use crate::infra::pool::PoolTemplateFetch;

/// Arguments for the create command.
///
/// Omitted resource flags keep the template's registered value.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Registered template to instantiate
    #[arg(long)]
    pub template: String,
    /// Name of the new VM
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub cpu: String,
    #[arg(long, default_value = "")]
    pub vcpu: String,
    /// Memory in MB
    #[arg(long, default_value = "")]
    pub memory: String,
    #[arg(long, default_value = "")]
    pub cpu_cost: String,
    #[arg(long, default_value = "")]
    pub memory_cost: String,
    #[arg(long, default_value = "")]
    pub disk_cost: String,
    /// Size of the first disk in MB
    #[arg(long, default_value = "")]
    pub disk_size: String,
    /// Source image of the first disk
    #[arg(long, default_value = "")]
    pub image: String,
    /// Inline FILES blob for the context section
    #[arg(long, default_value = "")]
    pub files: String,
    /// Pin the VM to a cluster
    #[arg(long = "cluster", default_value = "")]
    pub cluster_id: String,
    /// Network for a NIC slot, as SLOT=NETWORK (repeatable; replaces all NICs)
    #[arg(long = "vnet", value_parser = parse_key_val)]
    pub vnets: Vec<(String, String)>,
    /// Context value, as KEY=VALUE (repeatable)
    #[arg(long = "context", value_parser = parse_key_val)]
    pub context: Vec<(String, String)>,
}

impl CreateArgs {
    /// Build the request value.
    #[must_use]
    pub fn to_vm(&self) -> VirtualMachine {
        VirtualMachine {
            name: self.name.clone(),
            template_name: self.template.clone(),
            cpu: self.cpu.clone(),
            vcpu: self.vcpu.clone(),
            memory: self.memory.clone(),
            cpu_cost: self.cpu_cost.clone(),
            memory_cost: self.memory_cost.clone(),
            disk_cost: self.disk_cost.clone(),
            context: ContextOverrides::from_pairs(
                self.context.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ),
            files: self.files.clone(),
            disk_size: self.disk_size.clone(),
            image: self.image.clone(),
            cluster_id: self.cluster_id.clone(),
            vnets: self.vnets.iter().cloned().collect(),
            ..VirtualMachine::default()
        }
    }

    /// Context keys that will be dropped.
    fn unknown_context_keys(&self) -> impl Iterator<Item = &str> {
        self.context
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| !context_keys::ALL.contains(k))
    }
}

/// Run `onevm create`.
///
/// # Errors
///
/// Returns an error if the template cannot be resolved or the instantiate
/// call fails.
pub async fn run(app: &AppContext, args: &CreateArgs) -> Result<ExitCode> {
    for key in args.unknown_context_keys() {
        app.output.warn(&format!(
            "ignoring context key '{key}' (valid: {})",
            context_keys::ALL.join(", ")
        ));
    }

    let vm = args.to_vm();
    let connector = app.connector()?;
    let fetch = PoolTemplateFetch::new(&connector);
    let result = with_spinner(
        app,
        &format!("Creating {} from {}", vm.name, vm.template_name),
        create::create(&fetch, &connector, &vm),
    )
    .await?;

    app.renderer().render_result("create", &result)?;
    Ok(ExitCode::SUCCESS)
}
