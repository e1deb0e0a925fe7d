//! Catalog adapters backed by the daemon's pool listings.
//!
//! `one.templatepool.info` and `one.vmpool.info` both return an XML document
//! as a string payload; these adapters decode it and select by name.

use anyhow::Result;
use onevm_common::{methods, pool};
use serde::Deserialize;

use crate::application::ports::{GatewayConnector, TemplateFetch, TemplateRecord, VmQuery};
use crate::domain::{ComputeError, Element, RpcValue, Template, VmRecord};

// ── Pool documents ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct VmPoolDoc {
    #[serde(rename = "VM", default)]
    vms: Vec<RawVm>,
}

/// Everything optional: a VM the daemon lists but we cannot read still
/// occupies its slot in the result.
#[derive(Debug, Deserialize)]
struct RawVm {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(rename = "NAME", default)]
    name: Option<String>,
    #[serde(rename = "STATE", default)]
    state: Option<String>,
    #[serde(rename = "LCM_STATE", default)]
    lcm_state: Option<String>,
}

impl RawVm {
    fn into_record(self) -> Option<VmRecord> {
        Some(VmRecord {
            id: self.id?.trim().parse().ok()?,
            name: self.name?,
            state: self.state.and_then(|s| s.trim().parse().ok()),
            lcm_state: self.lcm_state.and_then(|s| s.trim().parse().ok()),
        })
    }
}

fn xml_payload<'v>(method: &str, value: &'v RpcValue) -> Result<&'v str> {
    value.as_str().ok_or_else(|| {
        ComputeError::UnexpectedPayload {
            method: method.to_string(),
            expected: "an XML document",
        }
        .into()
    })
}

fn decode_error(method: &str, e: &impl std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!("cannot decode {method} payload: {e}")
}

// ── Template fetch ───────────────────────────────────────────────────────────

/// Looks templates up in the template pool visible to the caller.
pub struct PoolTemplateFetch<'a, C> {
    connector: &'a C,
}

impl<'a, C: GatewayConnector> PoolTemplateFetch<'a, C> {
    #[must_use]
    pub fn new(connector: &'a C) -> Self {
        Self { connector }
    }
}

/// Select the first template named `name` from a pool document.
///
/// The `TEMPLATE` body is kept whole, including attributes this client
/// does not model.
///
/// # Errors
///
/// Returns [`ComputeError::TemplateNotFound`] when no entry matches.
pub fn select_template(pool_xml: &str, name: &str) -> Result<TemplateRecord> {
    let method = methods::TEMPLATE_POOL_INFO;
    let doc = Element::parse(pool_xml).map_err(|e| decode_error(method, &e))?;
    let Some(entry) = doc
        .children
        .iter()
        .filter(|c| c.name == "VMTEMPLATE")
        .find(|c| c.child_text("NAME") == Some(name))
    else {
        return Err(ComputeError::TemplateNotFound(name.to_string()).into());
    };

    let id = entry
        .child_text("ID")
        .and_then(|id| id.trim().parse::<i64>().ok())
        .ok_or_else(|| decode_error(method, &format!("template '{name}' has no ID")))?;
    let template = match entry.child("TEMPLATE") {
        Some(body) => Template::from_element(body).map_err(|e| decode_error(method, &e))?,
        None => Template::default(),
    };
    Ok(TemplateRecord {
        id,
        name: name.to_string(),
        template,
    })
}

impl<C: GatewayConnector> TemplateFetch for PoolTemplateFetch<'_, C> {
    async fn fetch(&self, name: &str) -> Result<TemplateRecord> {
        let payload = self
            .connector
            .scoped_call(methods::TEMPLATE_POOL_INFO, |auth| {
                vec![
                    auth.into(),
                    pool::FILTER_ALL.into(),
                    pool::RANGE_OPEN.into(),
                    pool::RANGE_OPEN.into(),
                ]
            })
            .await?;
        let record = select_template(xml_payload(methods::TEMPLATE_POOL_INFO, &payload)?, name)?;
        tracing::debug!(name, id = record.id, "template resolved");
        Ok(record)
    }
}

// ── VM query ─────────────────────────────────────────────────────────────────

/// Lists VMs from the VM pool and keeps those with a matching name.
pub struct PoolVmQuery<'a, C> {
    connector: &'a C,
}

impl<'a, C: GatewayConnector> PoolVmQuery<'a, C> {
    #[must_use]
    pub fn new(connector: &'a C) -> Self {
        Self { connector }
    }
}

/// Entries of a VM pool document named `name`, in document order. Entries
/// without a readable id come back as `None`.
///
/// # Errors
///
/// Returns an error if the document is not a VM pool.
pub fn select_vms(pool_xml: &str, name: &str) -> Result<Vec<Option<VmRecord>>> {
    let doc: VmPoolDoc =
        quick_xml::de::from_str(pool_xml).map_err(|e| decode_error(methods::VM_POOL_INFO, &e))?;
    Ok(doc
        .vms
        .into_iter()
        .filter(|vm| vm.name.as_deref() == Some(name))
        .map(RawVm::into_record)
        .collect())
}

impl<C: GatewayConnector> VmQuery for PoolVmQuery<'_, C> {
    async fn by_name(&self, name: &str) -> Result<Vec<Option<VmRecord>>> {
        let payload = self
            .connector
            .scoped_call(methods::VM_POOL_INFO, |auth| {
                vec![
                    auth.into(),
                    pool::FILTER_ALL.into(),
                    pool::RANGE_OPEN.into(),
                    pool::RANGE_OPEN.into(),
                    pool::ANY_ACTIVE_STATE.into(),
                ]
            })
            .await?;
        select_vms(xml_payload(methods::VM_POOL_INFO, &payload)?, name)
    }
}
