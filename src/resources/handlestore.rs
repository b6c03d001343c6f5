//! Handle store.
//!
//! Maps string IDs to media handles of one kind. Each name can be registered
//! once; lookups of unknown names are errors rather than defaults.

use rustc_hash::FxHashMap;

use crate::error::{AssetKind, ResourceError, Result};
use crate::media::{BitmapHandle, FontHandle, MusicHandle, SoundHandle};

/// Map of names to loaded handles of a single asset kind.
#[derive(Debug)]
pub struct HandleStore<H> {
    kind: AssetKind,
    handles: FxHashMap<String, H>,
}

pub type FontStore = HandleStore<FontHandle>;
pub type ImageStore = HandleStore<BitmapHandle>;
pub type SoundStore = HandleStore<SoundHandle>;
pub type MusicStore = HandleStore<MusicHandle>;

impl<H: Copy> HandleStore<H> {
    /// Create an empty store for `kind`.
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            handles: FxHashMap::default(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Fail if `id` is already registered.
    pub fn ensure_vacant(&self, id: &str) -> Result<()> {
        if self.handles.contains_key(id) {
            return Err(ResourceError::DuplicateRegistration {
                kind: self.kind,
                name: id.to_string(),
            });
        }
        Ok(())
    }

    /// Register a handle under `id`.
    pub fn add(&mut self, id: impl Into<String>, handle: H) -> Result<()> {
        let id = id.into();
        self.ensure_vacant(&id)?;
        self.handles.insert(id, handle);
        Ok(())
    }

    /// Get the handle registered under `id`.
    pub fn get(&self, id: impl AsRef<str>) -> Result<H> {
        let id = id.as_ref();
        self.handles
            .get(id)
            .copied()
            .ok_or_else(|| ResourceError::LookupMiss {
                kind: self.kind,
                name: id.to_string(),
            })
    }

    pub fn contains(&self, id: impl AsRef<str>) -> bool {
        self.handles.contains_key(id.as_ref())
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    /// Remove every entry, yielding the handles so they can be released.
    pub fn drain(&mut self) -> impl Iterator<Item = H> + '_ {
        self.handles.drain().map(|(_, handle)| handle)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn font(id: u32) -> FontHandle {
        FontHandle::from_raw(NonZeroU32::new(id).unwrap())
    }

    #[test]
    fn test_add_and_get() {
        let mut store = FontStore::new(AssetKind::Font);
        store.add("Courier", font(1)).unwrap();
        assert_eq!(store.get("Courier").unwrap(), font(1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_add_is_rejected_and_keeps_first() {
        let mut store = FontStore::new(AssetKind::Font);
        store.add("Menu", font(1)).unwrap();
        let err = store.add("Menu", font(2)).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::DuplicateRegistration { kind: AssetKind::Font, ref name } if name == "Menu"
        ));
        assert_eq!(store.get("Menu").unwrap(), font(1));
    }

    #[test]
    fn test_get_unknown_is_lookup_miss() {
        let store = FontStore::new(AssetKind::Font);
        let err = store.get("Nope").unwrap_err();
        assert!(matches!(err, ResourceError::LookupMiss { kind: AssetKind::Font, .. }));
    }

    #[test]
    fn test_drain_empties_store() {
        let mut store = FontStore::new(AssetKind::Font);
        store.add("a", font(1)).unwrap();
        store.add("b", font(2)).unwrap();
        let mut drained: Vec<u32> = store.drain().map(|h| h.raw().get()).collect();
        drained.sort();
        assert_eq!(drained, vec![1, 2]);
        assert!(store.is_empty());
        assert_eq!(store.drain().count(), 0);
    }
}
