//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use onevm_common::LifecycleAction;

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::commands::lifecycle::{ActionArgs, HardActionArgs, VerbArgs, resolve};

/// Drive OpenNebula VMs over XML-RPC
#[derive(Parser, Debug)]
#[command(
    name = "onevm",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log calls to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Instantiate a template as a new VM
    Create(Box<commands::create::CreateArgs>),

    /// Reboot a VM
    Reboot(HardActionArgs),

    /// Power a VM off
    Poweroff(HardActionArgs),

    /// Undeploy a VM, freeing its host resources
    Undeploy(HardActionArgs),

    /// Terminate a VM
    Delete(HardActionArgs),

    /// Resume a stopped, suspended or powered-off VM
    Resume(ActionArgs),

    /// Suspend a running VM
    Suspend(ActionArgs),

    /// Force-delete a VM regardless of its state
    Recover(ActionArgs),

    /// Send any lifecycle verb
    Action(VerbArgs),

    /// Find a VM by name
    Lookup {
        /// VM name
        name: String,
    },

    /// Manage images
    #[command(subcommand)]
    Image(commands::image::ImageCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
                json: self.json,
            },
            behaviour: BehaviourFlags { yes: self.yes },
        });

        match self.command {
            Command::Create(args) => commands::create::run(&app, &args).await,
            Command::Reboot(a) => {
                commands::lifecycle::run(&app, resolve(LifecycleAction::Reboot, a.hard), a.id).await
            }
            Command::Poweroff(a) => {
                commands::lifecycle::run(&app, resolve(LifecycleAction::Poweroff, a.hard), a.id)
                    .await
            }
            Command::Undeploy(a) => {
                commands::lifecycle::run(&app, resolve(LifecycleAction::Undeploy, a.hard), a.id)
                    .await
            }
            Command::Delete(a) => {
                commands::lifecycle::run(&app, resolve(LifecycleAction::Terminate, a.hard), a.id)
                    .await
            }
            Command::Resume(a) => commands::lifecycle::run(&app, LifecycleAction::Resume, a.id).await,
            Command::Suspend(a) => {
                commands::lifecycle::run(&app, LifecycleAction::Suspend, a.id).await
            }
            Command::Recover(a) => commands::lifecycle::recover(&app, &a).await,
            Command::Action(a) => commands::lifecycle::run(&app, a.verb, a.id).await,
            Command::Lookup { name } => commands::lookup::run(&app, &name).await,
            Command::Image(cmd) => commands::image::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => {
                commands::version::run(&app);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
