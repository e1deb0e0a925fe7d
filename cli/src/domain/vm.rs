//! Request-scoped VM values.
//!
//! Nothing here is persisted and nothing here holds a connection: every
//! operation receives its own gateway connector.

use std::collections::BTreeMap;

use onevm_common::context_keys;
use serde::Serialize;

/// A VM to create, or the target of a lifecycle action.
///
/// String overrides follow the empty-means-keep rule: an empty value leaves
/// the registered template untouched.
#[derive(Debug, Clone, Default)]
pub struct VirtualMachine {
    pub name: String,
    /// Assigned by the daemon on creation. Must be set by the caller before
    /// any lifecycle action; the client does not check the VM exists.
    pub vm_id: i64,
    pub template_name: String,
    pub cpu: String,
    pub vcpu: String,
    pub memory: String,
    pub cpu_cost: String,
    pub memory_cost: String,
    pub disk_cost: String,
    pub context: ContextOverrides,
    /// Inline `FILES` blob for the context section.
    pub files: String,
    /// Size of the first disk.
    pub disk_size: String,
    /// Source image of the first disk.
    pub image: String,
    pub cluster_id: String,
    /// Network slot name to network name. A non-empty map replaces every
    /// NIC in the template.
    pub vnets: BTreeMap<String, String>,
}

impl VirtualMachine {
    /// VM handle for lifecycle operations on an existing id.
    #[must_use]
    pub fn with_id(vm_id: i64) -> Self {
        Self {
            vm_id,
            ..Self::default()
        }
    }
}

/// Values written into the template's context section.
///
/// All eight are always written on creation; an absent value is written
/// as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOverrides {
    pub assembly_id: Option<String>,
    pub assemblies_id: Option<String>,
    pub accounts_id: Option<String>,
    pub org_id: Option<String>,
    pub api_key: Option<String>,
    pub quota_id: Option<String>,
    pub platform_id: Option<String>,
    pub ssh_public_key: Option<String>,
}

impl ContextOverrides {
    /// Build from `key=value` style pairs. Keys outside the whitelist are
    /// dropped; a later duplicate wins.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut ctx = Self::default();
        for (key, value) in pairs {
            let slot = match key {
                context_keys::ASSEMBLY_ID => &mut ctx.assembly_id,
                context_keys::ASSEMBLIES_ID => &mut ctx.assemblies_id,
                context_keys::ACCOUNTS_ID => &mut ctx.accounts_id,
                context_keys::ORG_ID => &mut ctx.org_id,
                context_keys::API_KEY => &mut ctx.api_key,
                context_keys::QUOTA_ID => &mut ctx.quota_id,
                context_keys::PLATFORM_ID => &mut ctx.platform_id,
                context_keys::SSH_PUBLIC_KEY => &mut ctx.ssh_public_key,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        ctx
    }
}

/// A VM as reported by the daemon's pool listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VmRecord {
    pub id: i64,
    pub name: String,
    pub state: Option<i64>,
    pub lcm_state: Option<i64>,
}
