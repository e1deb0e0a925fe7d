//! Editable VM template as understood by the OpenNebula daemon.
//!
//! Attributes this client reads or overrides are typed fields. Every other
//! child element is kept, in order, in `extra` and written back unchanged:
//! the daemon replaces a submitted attribute such as `CONTEXT` or `DISK`
//! as a whole, so dropping a sub-attribute here would drop it from the VM.

use crate::domain::error::{ComputeError, MarkupError};
use crate::domain::markup::Element;

/// Root `<TEMPLATE>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub cpu: Option<String>,
    pub vcpu: Option<String>,
    pub memory: Option<String>,
    pub cpu_cost: Option<String>,
    pub memory_cost: Option<String>,
    pub disk_cost: Option<String>,
    pub context: Context,
    pub disks: Vec<Disk>,
    pub nics: Vec<Nic>,
    pub sched_requirements: Option<String>,
    /// Unmodelled attributes, e.g. `OS` or `GRAPHICS`.
    pub extra: Vec<Element>,
}

/// `<CONTEXT>` section handed to the guest's contextualization agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub network: Option<String>,
    pub files: Option<String>,
    pub ssh_public_key: Option<String>,
    pub assembly_id: Option<String>,
    pub assemblies_id: Option<String>,
    pub accounts_id: Option<String>,
    pub org_id: Option<String>,
    pub api_key: Option<String>,
    pub quota_id: Option<String>,
    pub platform_id: Option<String>,
    /// Unmodelled keys, e.g. `START_SCRIPT` or `SET_HOSTNAME`.
    pub extra: Vec<Element>,
}

/// One `<DISK>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disk {
    pub image: Option<String>,
    pub image_id: Option<String>,
    pub image_uname: Option<String>,
    pub size: Option<String>,
    pub extra: Vec<Element>,
}

/// One `<NIC>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nic {
    pub network: Option<String>,
    pub network_id: Option<String>,
    pub network_uname: Option<String>,
    pub extra: Vec<Element>,
}

impl Nic {
    /// NIC bound to `network` and owned by `owner`.
    #[must_use]
    pub fn owned(network: &str, owner: &str) -> Self {
        Self {
            network: Some(network.to_string()),
            network_uname: Some(owner.to_string()),
            ..Self::default()
        }
    }

    fn from_element(element: &Element) -> Self {
        let mut nic = Self::default();
        for child in &element.children {
            let text = Some(child.text.clone());
            match child.name.as_str() {
                "NETWORK" => nic.network = text,
                "NETWORK_ID" => nic.network_id = text,
                "NETWORK_UNAME" => nic.network_uname = text,
                _ => nic.extra.push(child.clone()),
            }
        }
        nic
    }

    fn to_element(&self) -> Element {
        let mut children = Vec::new();
        push_leaf(&mut children, "NETWORK", self.network.as_deref());
        push_leaf(&mut children, "NETWORK_ID", self.network_id.as_deref());
        push_leaf(&mut children, "NETWORK_UNAME", self.network_uname.as_deref());
        children.extend(self.extra.iter().cloned());
        branch("NIC", children)
    }
}

impl Disk {
    fn from_element(element: &Element) -> Self {
        let mut disk = Self::default();
        for child in &element.children {
            let text = Some(child.text.clone());
            match child.name.as_str() {
                "IMAGE" => disk.image = text,
                "IMAGE_ID" => disk.image_id = text,
                "IMAGE_UNAME" => disk.image_uname = text,
                "SIZE" => disk.size = text,
                _ => disk.extra.push(child.clone()),
            }
        }
        disk
    }

    fn to_element(&self) -> Element {
        let mut children = Vec::new();
        push_leaf(&mut children, "IMAGE", self.image.as_deref());
        push_leaf(&mut children, "IMAGE_ID", self.image_id.as_deref());
        push_leaf(&mut children, "IMAGE_UNAME", self.image_uname.as_deref());
        push_leaf(&mut children, "SIZE", self.size.as_deref());
        children.extend(self.extra.iter().cloned());
        branch("DISK", children)
    }
}

impl Context {
    fn from_element(element: &Element) -> Self {
        let mut ctx = Self::default();
        for child in &element.children {
            let text = Some(child.text.clone());
            match child.name.as_str() {
                "NETWORK" => ctx.network = text,
                "FILES" => ctx.files = text,
                "SSH_PUBLIC_KEY" => ctx.ssh_public_key = text,
                "ASSEMBLY_ID" => ctx.assembly_id = text,
                "ASSEMBLIES_ID" => ctx.assemblies_id = text,
                "ACCOUNTS_ID" => ctx.accounts_id = text,
                "ORG_ID" => ctx.org_id = text,
                "API_KEY" => ctx.api_key = text,
                "QUOTA_ID" => ctx.quota_id = text,
                "PLATFORM_ID" => ctx.platform_id = text,
                _ => ctx.extra.push(child.clone()),
            }
        }
        ctx
    }

    fn to_element(&self) -> Element {
        let mut children = Vec::new();
        push_leaf(&mut children, "NETWORK", self.network.as_deref());
        push_leaf(&mut children, "FILES", self.files.as_deref());
        push_leaf(&mut children, "SSH_PUBLIC_KEY", self.ssh_public_key.as_deref());
        push_leaf(&mut children, "ASSEMBLY_ID", self.assembly_id.as_deref());
        push_leaf(&mut children, "ASSEMBLIES_ID", self.assemblies_id.as_deref());
        push_leaf(&mut children, "ACCOUNTS_ID", self.accounts_id.as_deref());
        push_leaf(&mut children, "ORG_ID", self.org_id.as_deref());
        push_leaf(&mut children, "API_KEY", self.api_key.as_deref());
        push_leaf(&mut children, "QUOTA_ID", self.quota_id.as_deref());
        push_leaf(&mut children, "PLATFORM_ID", self.platform_id.as_deref());
        children.extend(self.extra.iter().cloned());
        branch("CONTEXT", children)
    }
}

impl Template {
    /// Build a template from a parsed `<TEMPLATE>` element.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError`] if the element is not a `TEMPLATE`.
    pub fn from_element(element: &Element) -> Result<Self, MarkupError> {
        if element.name != "TEMPLATE" {
            return Err(MarkupError(format!(
                "expected <TEMPLATE>, got <{}>",
                element.name
            )));
        }
        let mut t = Self::default();
        for child in &element.children {
            let text = Some(child.text.clone());
            match child.name.as_str() {
                "CPU" => t.cpu = text,
                "VCPU" => t.vcpu = text,
                "MEMORY" => t.memory = text,
                "CPU_COST" => t.cpu_cost = text,
                "MEMORY_COST" => t.memory_cost = text,
                "DISK_COST" => t.disk_cost = text,
                "CONTEXT" => t.context = Context::from_element(child),
                "DISK" => t.disks.push(Disk::from_element(child)),
                "NIC" => t.nics.push(Nic::from_element(child)),
                "SCHED_REQUIREMENTS" => t.sched_requirements = text,
                _ => t.extra.push(child.clone()),
            }
        }
        Ok(t)
    }

    /// Parse a `<TEMPLATE>` document.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup does not describe a template.
    pub fn from_xml(xml: &str) -> Result<Self, MarkupError> {
        Self::from_element(&Element::parse(xml)?)
    }

    /// The template as a `<TEMPLATE>` element tree.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut children = Vec::new();
        push_leaf(&mut children, "CPU", self.cpu.as_deref());
        push_leaf(&mut children, "VCPU", self.vcpu.as_deref());
        push_leaf(&mut children, "MEMORY", self.memory.as_deref());
        push_leaf(&mut children, "CPU_COST", self.cpu_cost.as_deref());
        push_leaf(&mut children, "MEMORY_COST", self.memory_cost.as_deref());
        push_leaf(&mut children, "DISK_COST", self.disk_cost.as_deref());
        children.push(self.context.to_element());
        children.extend(self.disks.iter().map(Disk::to_element));
        children.extend(self.nics.iter().map(Nic::to_element));
        push_leaf(
            &mut children,
            "SCHED_REQUIREMENTS",
            self.sched_requirements.as_deref(),
        );
        children.extend(self.extra.iter().cloned());
        branch("TEMPLATE", children)
    }

    /// Render the template as the markup `one.template.instantiate` expects.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::TemplateSerialization`] when rendering fails.
    pub fn to_xml(&self) -> Result<String, ComputeError> {
        self.to_element()
            .to_xml()
            .map_err(|e| ComputeError::TemplateSerialization(e.to_string()))
    }
}

fn push_leaf(children: &mut Vec<Element>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        children.push(Element::leaf(name, value));
    }
}

fn branch(name: &str, children: Vec<Element>) -> Element {
    Element {
        name: name.to_string(),
        text: String::new(),
        children,
    }
}
