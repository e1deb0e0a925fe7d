//! Image operations: save a VM disk as an image, remove an image.

use anyhow::Result;
use onevm_common::methods;

use crate::application::ports::GatewayConnector;
use crate::domain::{Image, RpcValue};

/// Image type slot of `one.vm.disksaveas`. Left empty so the daemon keeps the
/// source disk's type.
const INHERIT_IMAGE_TYPE: &str = "";

/// Save `image.disk_id` of `image.vm_id` (at `image.snap_id`) as a new image
/// named `image.name`. Returns the daemon's result (the new image id).
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn disk_save_as(connector: &impl GatewayConnector, image: &Image) -> Result<RpcValue> {
    let result = connector
        .scoped_call(methods::VM_DISK_SAVE_AS, |auth| {
            vec![
                auth.into(),
                image.vm_id.into(),
                image.disk_id.into(),
                image.name.as_str().into(),
                INHERIT_IMAGE_TYPE.into(),
                image.snap_id.into(),
            ]
        })
        .await?;
    tracing::info!(
        vm_id = image.vm_id,
        disk_id = image.disk_id,
        snap_id = image.snap_id,
        name = %image.name,
        "disk saved as image"
    );
    Ok(result)
}

/// Remove `image.image_id` from its datastore.
///
/// # Errors
///
/// Returns the gateway's error unchanged if the call fails.
pub async fn remove_image(connector: &impl GatewayConnector, image: &Image) -> Result<RpcValue> {
    let result = connector
        .scoped_call(methods::IMAGE_DELETE, |auth| {
            vec![auth.into(), image.image_id.into()]
        })
        .await?;
    tracing::info!(image_id = image.image_id, "image removed");
    Ok(result)
}
