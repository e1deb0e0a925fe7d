//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::{OnevmConfig, RpcValue, Template, VmRecord};

// ── Call Gateway Ports ────────────────────────────────────────────────────────

/// One open connection to the daemon's RPC endpoint.
///
/// `close` consumes the gateway, so a closed handle cannot be reused.
#[allow(async_fn_in_trait)]
pub trait CallGateway {
    /// Session string passed as the first argument of every call.
    fn auth_key(&self) -> &str;
    /// Invoke `method` with positional `args` and return the unwrapped result.
    async fn call(&self, method: &str, args: Vec<RpcValue>) -> Result<RpcValue>;
    /// Release the connection.
    async fn close(self) -> Result<()>;
}

/// Opens gateways. Each operation acquires its own and releases it when done.
#[allow(async_fn_in_trait)]
pub trait GatewayConnector {
    type Gateway: CallGateway;

    /// Open a fresh gateway.
    async fn connect(&self) -> Result<Self::Gateway>;

    /// Open a gateway, make exactly one call, and close it on every path.
    ///
    /// `build_args` receives the gateway's auth key and returns the full
    /// positional argument list. The call result is returned unchanged; a
    /// failure to close is logged and never replaces it.
    async fn scoped_call<F>(&self, method: &str, build_args: F) -> Result<RpcValue>
    where
        F: FnOnce(&str) -> Vec<RpcValue>,
    {
        let gateway = self.connect().await?;
        let args = build_args(gateway.auth_key());
        tracing::debug!(method, args = args.len(), "submitting call");
        let result = gateway.call(method, args).await;
        if let Err(e) = gateway.close().await {
            tracing::warn!(method, error = %e, "failed to close gateway");
        }
        result
    }
}

// ── Catalog Ports ─────────────────────────────────────────────────────────────

/// A registered template and its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    pub id: i64,
    pub name: String,
    pub template: Template,
}

/// Resolves a template name to an editable template.
#[allow(async_fn_in_trait)]
pub trait TemplateFetch {
    async fn fetch(&self, name: &str) -> Result<TemplateRecord>;
}

/// Lists VMs by name.
#[allow(async_fn_in_trait)]
pub trait VmQuery {
    /// Candidate VMs named `name`, in daemon order. `None` marks an entry the
    /// daemon returned but that could not be decoded.
    async fn by_name(&self, name: &str) -> Result<Vec<Option<VmRecord>>>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the stored configuration, or defaults when none exists.
    fn load(&self) -> Result<OnevmConfig>;
    /// Persist the given configuration.
    fn save(&self, config: &OnevmConfig) -> Result<()>;
    /// Location of the backing file.
    fn path(&self) -> Result<PathBuf>;
}
