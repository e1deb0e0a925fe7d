//! `onevm image`: save a VM disk as an image, remove an image.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::image;
use crate::commands::{confirmed, with_spinner};
use crate::domain::Image;

/// Image subcommands.
#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Save a VM disk (or one of its snapshots) as a new image
    SaveAs {
        /// VM owning the disk
        #[arg(long = "vm")]
        vm_id: i64,
        /// Disk index within the VM
        #[arg(long = "disk")]
        disk_id: i64,
        /// Disk snapshot to save (-1 for the current state)
        #[arg(long = "snapshot", default_value_t = -1, allow_negative_numbers = true)]
        snap_id: i64,
        /// Name of the new image
        #[arg(long)]
        name: String,
    },
    /// Remove an image
    Delete {
        /// Image id
        id: i64,
    },
}

/// Run the image command.
///
/// # Errors
///
/// Returns an error if the daemon rejects the call.
pub async fn run(app: &AppContext, cmd: ImageCommand) -> Result<ExitCode> {
    let connector = app.connector()?;
    match cmd {
        ImageCommand::SaveAs {
            vm_id,
            disk_id,
            snap_id,
            name,
        } => {
            let request = Image::snapshot_of(vm_id, disk_id, snap_id, &name);
            let result = with_spinner(
                app,
                &format!("Saving disk {disk_id} of VM {vm_id} as {name}"),
                image::disk_save_as(&connector, &request),
            )
            .await?;
            app.renderer().render_result("disksaveas", &result)?;
        }
        ImageCommand::Delete { id } => {
            if !confirmed(app, &format!("Delete image {id}?"))? {
                app.output.warn("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            let request = Image::with_id(id);
            let result = with_spinner(
                app,
                &format!("Removing image {id}"),
                image::remove_image(&connector, &request),
            )
            .await?;
            app.renderer().render_result("image delete", &result)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
