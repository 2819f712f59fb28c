//! Display trees that hold rendered output at named mount points.

use crate::{RenderError, RenderResult};
use std::collections::HashMap;

/// A display tree addressed by mount id.
pub trait MountTree {
    /// Clear `mount_id` and insert `markup` as its only child.
    ///
    /// Fails with [`RenderError::MountNotFound`] without touching anything.
    fn replace_children(&mut self, mount_id: &str, markup: &str) -> RenderResult<()>;
}

/// In-memory display tree for tests and native use.
#[derive(Debug, Default)]
pub struct MemoryMountTree {
    mounts: HashMap<String, Vec<String>>,
}

impl MemoryMountTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty mount point.
    pub fn add_mount(&mut self, mount_id: impl Into<String>) {
        self.mounts.entry(mount_id.into()).or_default();
    }

    /// Append a child without clearing, like foreign content already on the page.
    pub fn push_child(&mut self, mount_id: &str, markup: impl Into<String>) -> RenderResult<()> {
        self.mounts
            .get_mut(mount_id)
            .ok_or_else(|| RenderError::MountNotFound(mount_id.to_string()))?
            .push(markup.into());
        Ok(())
    }

    /// Children of a mount, `None` if it does not exist.
    pub fn children(&self, mount_id: &str) -> Option<&[String]> {
        self.mounts.get(mount_id).map(Vec::as_slice)
    }
}

impl MountTree for MemoryMountTree {
    fn replace_children(&mut self, mount_id: &str, markup: &str) -> RenderResult<()> {
        let children = self
            .mounts
            .get_mut(mount_id)
            .ok_or_else(|| RenderError::MountNotFound(mount_id.to_string()))?;
        children.clear();
        children.push(markup.to_string());
        Ok(())
    }
}

/// The browser document.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct DomMountTree;

#[cfg(target_arch = "wasm32")]
impl DomMountTree {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl MountTree for DomMountTree {
    fn replace_children(&mut self, mount_id: &str, markup: &str) -> RenderResult<()> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| RenderError::Display("No document".to_string()))?;
        let container = document
            .get_element_by_id(mount_id)
            .ok_or_else(|| RenderError::MountNotFound(mount_id.to_string()))?;
        // One assignment swaps old children for the new image.
        container.set_inner_html(markup);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_clears_previous() {
        let mut tree = MemoryMountTree::new();
        tree.add_mount("m");
        tree.push_child("m", "<p>old</p>").unwrap();
        tree.push_child("m", "<p>older</p>").unwrap();

        tree.replace_children("m", "<svg/>").unwrap();
        assert_eq!(tree.children("m").unwrap(), ["<svg/>".to_string()]);
    }

    #[test]
    fn test_missing_mount() {
        let mut tree = MemoryMountTree::new();
        assert_eq!(
            tree.replace_children("nope", "<svg/>"),
            Err(RenderError::MountNotFound("nope".to_string()))
        );
        assert!(tree.children("nope").is_none());
    }
}
