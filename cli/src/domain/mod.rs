//! Domain layer: pure business logic and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `reqwest`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod image;
pub mod markup;
pub mod rpc;
pub mod template;
pub mod vm;

pub use config::{OnevmConfig, validate_config_key, validate_config_value};
pub use error::{ComputeError, ConfigError, MarkupError, RpcError};
pub use image::Image;
pub use markup::Element;
pub use rpc::RpcValue;
pub use template::{Context, Disk, Nic, Template};
pub use vm::{ContextOverrides, VirtualMachine, VmRecord};
