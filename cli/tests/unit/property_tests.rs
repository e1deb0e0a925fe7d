//! Property tests for template customization.

use std::collections::BTreeMap;

use onevm_cli::application::services::create::customize;
use onevm_cli::domain::{Disk, Nic, Template, VirtualMachine};
use proptest::prelude::*;

fn template_with(cpu: Option<String>, nics: usize, disks: usize) -> Template {
    Template {
        cpu,
        memory: Some("1024".to_string()),
        nics: (0..nics)
            .map(|i| Nic::owned(&format!("net-{i}"), "someone"))
            .collect(),
        disks: (0..disks)
            .map(|i| Disk {
                image: Some(format!("img-{i}")),
                size: Some("100".to_string()),
                ..Disk::default()
            })
            .collect(),
        ..Template::default()
    }
}

proptest! {
    /// A non-empty override always wins; an empty one never changes the field.
    #[test]
    fn prop_sentinel_override(
        registered in proptest::option::of("[0-9]{1,3}"),
        value in "[0-9.]{0,4}",
    ) {
        let mut template = template_with(registered.clone(), 0, 0);
        let vm = VirtualMachine { cpu: value.clone(), ..VirtualMachine::default() };

        customize(&mut template, &vm);

        if value.is_empty() {
            prop_assert_eq!(template.cpu, registered);
        } else {
            prop_assert_eq!(template.cpu, Some(value));
        }
    }

    /// A non-empty network map yields exactly one oneadmin-owned NIC per entry,
    /// whatever the template had.
    #[test]
    fn prop_vnets_replace_nics(
        existing in 0usize..5,
        vnets in proptest::collection::btree_map("eth[0-9]", "[a-z]{1,8}", 1..4),
    ) {
        let mut template = template_with(None, existing, 0);
        let vm = VirtualMachine { vnets: vnets.clone(), ..VirtualMachine::default() };

        customize(&mut template, &vm);

        prop_assert_eq!(template.nics.len(), vnets.len());
        for (nic, network) in template.nics.iter().zip(vnets.values()) {
            prop_assert_eq!(nic.network.as_deref(), Some(network.as_str()));
            prop_assert_eq!(nic.network_uname.as_deref(), Some("oneadmin"));
        }
    }

    /// An empty network map leaves the NIC list untouched.
    #[test]
    fn prop_empty_vnets_keep_nics(existing in 0usize..5) {
        let mut template = template_with(None, existing, 0);
        let before = template.nics.clone();

        customize(&mut template, &VirtualMachine {
            vnets: BTreeMap::new(),
            ..VirtualMachine::default()
        });

        prop_assert_eq!(template.nics, before);
    }

    /// Disk overrides never reach past the first disk.
    #[test]
    fn prop_disk_override_first_slot_only(disks in 0usize..4, size in "[1-9][0-9]{0,4}") {
        let mut template = template_with(None, 0, disks);
        let vm = VirtualMachine { disk_size: size.clone(), ..VirtualMachine::default() };

        customize(&mut template, &vm);

        prop_assert_eq!(template.disks.len(), disks);
        for (i, disk) in template.disks.iter().enumerate() {
            let expected = if i == 0 { size.as_str() } else { "100" };
            prop_assert_eq!(disk.size.as_deref(), Some(expected));
        }
    }

    /// Customized templates always render to markup that parses back.
    #[test]
    fn prop_customized_template_renders(
        cpu in "[0-9.]{0,4}",
        org in proptest::option::of("[ -~]{0,20}"),
    ) {
        let mut template = template_with(Some("1".to_string()), 2, 1);
        let mut vm = VirtualMachine { cpu, ..VirtualMachine::default() };
        vm.context.org_id = org;

        customize(&mut template, &vm);

        let xml = template.to_xml().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let parsed = Template::from_xml(&xml).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(parsed.cpu, template.cpu);
        prop_assert_eq!(parsed.nics, template.nics);
    }
}
