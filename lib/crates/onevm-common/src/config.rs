use serde::Deserialize;

/// Connection settings read from `ONEVM_*` environment variables.
///
/// Every field is optional; a present value overrides the config file.
///   - `ONEVM_ENDPOINT`      XML-RPC endpoint URL
///   - `ONEVM_USERNAME`      account name
///   - `ONEVM_PASSWORD`      account password or token
///   - `ONEVM_TIMEOUT_SECS`  per-call HTTP timeout
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct EnvOverrides {
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl EnvOverrides {
    /// Prefix applied to every variable name.
    pub const PREFIX: &'static str = "ONEVM_";

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
