use egui::{Context, TextureHandle, TextureId, TextureOptions};
use std::collections::HashMap;

use crate::snapshot::Snapshot;

/// Caches GPU textures for snapshot images shown on the canvas
pub struct TextureManager {
    /// Cache of textures by snapshot id
    texture_cache: HashMap<usize, TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<usize, u64>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    /// Maximum number of textures to cache
    max_cache_size: usize,
}

impl TextureManager {
    /// Creates a new texture manager with the specified cache size
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets or uploads the texture for a snapshot
    pub fn texture_for(&mut self, snapshot: &Snapshot, ctx: &Context) -> TextureId {
        let key = snapshot.id();
        self.last_used.insert(key, self.current_frame);

        if let Some(handle) = self.texture_cache.get(&key) {
            return handle.id();
        }

        let name = format!("snapshot_{key}");
        let handle = ctx.load_texture(name, snapshot.to_color_image(), TextureOptions::NEAREST);
        let id = handle.id();
        self.texture_cache.insert(key, handle);
        self.prune_cache_if_needed();
        id
    }

    /// Prunes least recently used textures beyond the maximum size
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(usize, u64)> = self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len().saturating_sub(self.max_cache_size);
        for (key, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    /// Returns the number of textures currently in the cache
    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn contains(&self, snapshot_id: usize) -> bool {
        self.texture_cache.contains_key(&snapshot_id)
    }
}
