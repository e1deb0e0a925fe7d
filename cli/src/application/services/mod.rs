//! Application services: use-case orchestration.
//!
//! Each service function accepts port trait bounds (`&impl GatewayConnector`,
//! `&impl TemplateFetch`, etc.) and never constructs infrastructure types.

pub mod config_service;
pub mod create;
pub mod image;
pub mod lifecycle;
pub mod lookup;
