//! HTTP implementation of the call gateway ports.
//!
//! Every `connect` builds its own `reqwest::Client`; `close` drops it, so no
//! connection outlives the operation that opened it.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CallGateway, GatewayConnector};
use crate::domain::{OnevmConfig, RpcError, RpcValue};
use crate::infra::xmlrpc;

/// Opens [`HttpGateway`]s against one XML-RPC endpoint.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    endpoint: String,
    auth_key: String,
    timeout: Duration,
}

impl HttpConnector {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, auth_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_key: auth_key.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(config: &OnevmConfig) -> Self {
        Self::new(&config.endpoint, config.auth_key(), config.timeout())
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GatewayConnector for HttpConnector {
    type Gateway = HttpGateway;

    async fn connect(&self) -> Result<HttpGateway> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| RpcError::Transport {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })?;
        tracing::debug!(endpoint = %self.endpoint, "gateway opened");
        Ok(HttpGateway {
            client,
            endpoint: self.endpoint.clone(),
            auth_key: self.auth_key.clone(),
        })
    }
}

/// One open connection to the endpoint.
#[derive(Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
    auth_key: String,
}

impl HttpGateway {
    fn transport(&self, e: &reqwest::Error) -> RpcError {
        RpcError::Transport {
            endpoint: self.endpoint.clone(),
            message: e.to_string(),
        }
    }
}

impl CallGateway for HttpGateway {
    fn auth_key(&self) -> &str {
        &self.auth_key
    }

    async fn call(&self, method: &str, args: Vec<RpcValue>) -> Result<RpcValue> {
        let body = xmlrpc::encode_call(method, &args)?;
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let text = response.text().await.map_err(|e| self.transport(&e))?;
        let value = xmlrpc::decode_response(method, &text)?;
        let payload = xmlrpc::unpack_envelope(method, value)?;
        tracing::debug!(method, "call succeeded");
        Ok(payload)
    }

    async fn close(self) -> Result<()> {
        tracing::debug!(endpoint = %self.endpoint, "gateway closed");
        drop(self.client);
        Ok(())
    }
}
