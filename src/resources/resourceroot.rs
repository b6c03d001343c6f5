//! Resolution of asset file names to paths on disk.
//!
//! Assets live under a single root directory, partitioned by kind:
//!
//! ```text
//! Resources/
//!   fonts/
//!   images/
//!   sounds/
//! ```

use std::path::{Path, PathBuf};

pub const DEFAULT_RESOURCE_ROOT: &str = "./Resources";

/// Which subdirectory of the resource root a file lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Font,
    Bitmap,
    /// Sound effects and music.
    Sound,
}

impl ResourceKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            ResourceKind::Font => "fonts",
            ResourceKind::Bitmap => "images",
            ResourceKind::Sound => "sounds",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoot {
    root: PathBuf,
}

impl Default for ResourceRoot {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_ROOT)
    }
}

impl ResourceRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `file` under the directory for `kind`.
    pub fn path_to(&self, kind: ResourceKind, file: &str) -> PathBuf {
        self.root.join(kind.dir_name()).join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_partitions_by_kind() {
        let root = ResourceRoot::new("Resources");
        assert_eq!(
            root.path_to(ResourceKind::Font, "arial.ttf"),
            Path::new("Resources/fonts/arial.ttf")
        );
        assert_eq!(
            root.path_to(ResourceKind::Bitmap, "splash.png"),
            Path::new("Resources/images/splash.png")
        );
        assert_eq!(
            root.path_to(ResourceKind::Sound, "hit.wav"),
            Path::new("Resources/sounds/hit.wav")
        );
    }

    #[test]
    fn test_default_root() {
        assert_eq!(ResourceRoot::default().root(), Path::new(DEFAULT_RESOURCE_ROOT));
    }
}
