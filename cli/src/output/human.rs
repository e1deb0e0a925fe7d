//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::domain::config::CONFIG_PATH_VAR;
use crate::domain::{OnevmConfig, RpcValue, VmRecord};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("onevm {version}");
    }

    /// Render the outcome of one daemon operation.
    pub fn render_result(&self, operation: &str, result: &RpcValue) {
        self.ctx.success(&format!("{operation}: {result}"));
    }

    /// Render a VM record.
    pub fn render_vm(&self, vm: &VmRecord) {
        self.ctx.kv("ID:", &vm.id.to_string());
        self.ctx.kv("Name:", &vm.name);
        self.ctx.kv("State:", &optional(vm.state));
        self.ctx.kv("LCM state:", &optional(vm.lcm_state));
    }

    /// Render the configuration with the password masked.
    pub fn render_config(&self, config: &OnevmConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<20} {}", "endpoint:", config.endpoint);
        println!("  {:<20} {}", "username:", config.username);
        println!(
            "  {:<20} {}",
            "password:",
            if config.password.is_some() {
                "********"
            } else {
                "(not set)"
            }
        );
        println!("  {:<20} {}", "timeout_secs:", config.timeout_secs);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_PATH_VAR, "ONEVM_ENDPOINT", "ONEVM_USERNAME", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!(
            "    {:<18} {}",
            "ONEVM_PASSWORD:",
            if std::env::var("ONEVM_PASSWORD").is_ok() {
                "(set)"
            } else {
                "(not set)"
            }
        );
        println!();
    }
}

fn optional(value: Option<i64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}
