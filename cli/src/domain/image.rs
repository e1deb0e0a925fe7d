//! Request-scoped image values.

/// Source and target of a disk-to-image save, or an image to remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    /// Name of the image to create.
    pub name: String,
    pub vm_id: i64,
    pub disk_id: i64,
    /// Snapshot of the disk to save; `-1` saves the current disk state.
    pub snap_id: i64,
    /// Image to remove.
    pub image_id: i64,
}

impl Image {
    /// Disk-save request for `disk_id` of `vm_id`.
    #[must_use]
    pub fn snapshot_of(vm_id: i64, disk_id: i64, snap_id: i64, name: &str) -> Self {
        Self {
            name: name.to_string(),
            vm_id,
            disk_id,
            snap_id,
            image_id: 0,
        }
    }

    /// Handle on an existing image.
    #[must_use]
    pub fn with_id(image_id: i64) -> Self {
        Self {
            image_id,
            ..Self::default()
        }
    }
}
