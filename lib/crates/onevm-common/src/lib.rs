pub mod config;
pub mod types;
pub mod wire;

pub use config::EnvOverrides;
pub use types::{LifecycleAction, ParseActionError};
pub use wire::{NIC_OWNER, cluster_requirement, context_keys, methods, pool, recover};
