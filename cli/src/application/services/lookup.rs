//! Resolve a VM by name.

use anyhow::Result;

use crate::application::ports::VmQuery;
use crate::domain::{ComputeError, VmRecord};

/// First VM named `name`.
///
/// There is no disambiguation: when several VMs share the name, the first
/// one the daemon lists wins.
///
/// # Errors
///
/// Returns [`ComputeError::NoVm`] when the query yields nothing or its first
/// entry is absent, and the query's own error unchanged if it fails.
pub async fn by_name(query: &impl VmQuery, name: &str) -> Result<VmRecord> {
    let candidates = query.by_name(name).await?;
    match candidates.into_iter().next() {
        Some(Some(vm)) => Ok(vm),
        _ => Err(ComputeError::NoVm.into()),
    }
}
