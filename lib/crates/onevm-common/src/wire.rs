/// XML-RPC method names exposed by the OpenNebula daemon
pub mod methods {
    /// Instantiate a VM from a registered template
    /// Args: auth, template_id, vm_name, on_hold, extra_template_xml
    pub const TEMPLATE_INSTANTIATE: &str = "one.template.instantiate";

    /// Lifecycle action on an existing VM
    /// Args: auth, action_verb, vm_id
    pub const VM_ACTION: &str = "one.vm.action";

    /// Recover a VM stuck in any state
    /// Args: auth, vm_id, recover_operation
    pub const VM_RECOVER: &str = "one.vm.recover";

    /// Save a VM disk (or one of its snapshots) as a new image
    /// Args: auth, vm_id, disk_id, image_name, image_type, snapshot_id
    pub const VM_DISK_SAVE_AS: &str = "one.vm.disksaveas";

    /// Remove an image from the datastore
    /// Args: auth, image_id
    pub const IMAGE_DELETE: &str = "one.image.delete";

    /// List templates visible to the caller
    /// Args: auth, filter_flag, start_id, end_id
    pub const TEMPLATE_POOL_INFO: &str = "one.templatepool.info";

    /// List VMs visible to the caller
    /// Args: auth, filter_flag, start_id, end_id, state
    pub const VM_POOL_INFO: &str = "one.vmpool.info";
}

/// Operation codes accepted by `one.vm.recover`
pub mod recover {
    /// Remove the VM regardless of its state
    pub const FORCE_DELETE: i64 = 3;
}

/// Pool query arguments
pub mod pool {
    /// Every resource in the pool (-1 would narrow it to the caller and its groups)
    pub const FILTER_ALL: i64 = -2;
    /// Open start/end of the id range
    pub const RANGE_OPEN: i64 = -1;
    /// Any VM state except DONE
    pub const ANY_ACTIVE_STATE: i64 = -1;
}

/// Caller-facing context keys. Anything else in a context pair list is dropped.
pub mod context_keys {
    pub const ASSEMBLY_ID: &str = "assembly_id";
    pub const ASSEMBLIES_ID: &str = "assemblies_id";
    pub const ACCOUNTS_ID: &str = "accounts_id";
    pub const ORG_ID: &str = "org_id";
    pub const API_KEY: &str = "api_key";
    pub const QUOTA_ID: &str = "quota_id";
    pub const PLATFORM_ID: &str = "platform_id";
    pub const SSH_PUBLIC_KEY: &str = "SSH_PUBLIC_KEY";

    pub const ALL: &[&str] = &[
        ASSEMBLY_ID,
        ASSEMBLIES_ID,
        ACCOUNTS_ID,
        ORG_ID,
        API_KEY,
        QUOTA_ID,
        PLATFORM_ID,
        SSH_PUBLIC_KEY,
    ];
}

/// Account that owns every NIC generated from a network override
pub const NIC_OWNER: &str = "oneadmin";

/// Scheduling requirement pinning a VM to one cluster.
#[must_use]
pub fn cluster_requirement(cluster_id: &str) -> String {
    format!("CLUSTER_ID=\"{cluster_id}\"")
}
