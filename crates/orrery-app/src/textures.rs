//! Headless texture source: hands out stable handles per asset path.
//!
//! The GPU loader lives outside this workspace. This registry stands in for
//! it so the scene can be composed without a device, and, when given an asset
//! root, reports textures whose files are missing the same way a loader
//! would (a warning and the fallback handle).

use std::collections::HashMap;
use std::path::PathBuf;

use orrery_sim::{TextureHandle, TextureSource};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct TextureRegistry {
    asset_root: Option<PathBuf>,
    /// Reverse lookup: asset key → handle.
    handles: HashMap<String, TextureHandle>,
    /// Dense list of registered keys; index + 1 == handle.
    names: Vec<String>,
}

impl TextureRegistry {
    /// Registry that accepts every asset without touching the filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that checks each asset exists under `root`.
    #[must_use]
    pub fn with_asset_root(root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Number of distinct textures handed out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Asset key for a handle, if it came from this registry.
    #[must_use]
    pub fn name(&self, handle: TextureHandle) -> Option<&str> {
        let index = (handle.0 as usize).checked_sub(1)?;
        self.names.get(index).map(String::as_str)
    }

    fn is_available(&self, asset: &str) -> bool {
        match &self.asset_root {
            Some(root) => root.join(asset).is_file(),
            None => true,
        }
    }

    fn register(&mut self, key: String) -> TextureHandle {
        if let Some(&handle) = self.handles.get(&key) {
            return handle;
        }
        let handle = TextureHandle(self.names.len() as u32 + 1);
        debug!("Registered texture {key} as {}", handle.0);
        self.handles.insert(key.clone(), handle);
        self.names.push(key);
        handle
    }
}

impl TextureSource for TextureRegistry {
    fn texture(&mut self, asset: &str) -> TextureHandle {
        if !self.is_available(asset) {
            warn!("Texture not found: {asset}");
            return TextureHandle::MISSING;
        }
        self.register(asset.to_string())
    }

    fn cubemap(&mut self, faces: &[&str; 6]) -> TextureHandle {
        if let Some(missing) = faces.iter().find(|face| !self.is_available(face)) {
            warn!("Cubemap face not found: {missing}");
            return TextureHandle::MISSING;
        }
        self.register(faces.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_stable_and_nonzero() {
        let mut textures = TextureRegistry::new();
        let earth = textures.texture("assets/earth.jpg");
        let mars = textures.texture("assets/mars.jpg");
        assert!(!earth.is_missing());
        assert_ne!(earth, mars);
        assert_eq!(textures.texture("assets/earth.jpg"), earth);
        assert_eq!(textures.len(), 2);
        assert_eq!(textures.name(mars), Some("assets/mars.jpg"));
    }

    #[test]
    fn test_missing_file_under_root_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sun.jpg"), b"").unwrap();
        let mut textures = TextureRegistry::with_asset_root(dir.path());
        assert!(!textures.texture("sun.jpg").is_missing());
        assert!(textures.texture("absent.jpg").is_missing());
        assert_eq!(textures.len(), 1);
    }

    #[test]
    fn test_cubemap_is_one_handle() {
        let mut textures = TextureRegistry::new();
        let faces = ["a", "b", "c", "d", "e", "f"];
        let sky = textures.cubemap(&faces);
        assert_eq!(textures.cubemap(&faces), sky);
        assert_eq!(textures.len(), 1);
        assert_eq!(textures.name(TextureHandle::MISSING), None);
    }

    #[test]
    fn test_cubemap_missing_face() {
        let dir = tempfile::tempdir().unwrap();
        let mut textures = TextureRegistry::with_asset_root(dir.path());
        assert!(textures.cubemap(&["a", "b", "c", "d", "e", "f"]).is_missing());
        assert!(textures.is_empty());
    }
}
