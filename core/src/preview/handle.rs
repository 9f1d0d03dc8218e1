use crate::upload::SelectedFile;
use log::debug;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Issues per-file handles and counts the ones still open
///
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct HandleRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: AtomicU64,
    open: AtomicUsize,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a handle on the file for the primary renderer
    pub fn acquire(&self, file: &SelectedFile) -> FileHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.open.fetch_add(1, Ordering::Relaxed);
        debug!("Opened handle #{} for {}", id, file.name());
        FileHandle {
            id,
            file: file.clone(),
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of handles not yet released
    pub fn open_handles(&self) -> usize {
        self.inner.open.load(Ordering::Relaxed)
    }
}

/// Scoped reference handed to the primary renderer
///
/// Released when dropped.
#[derive(Debug)]
pub struct FileHandle {
    id: u64,
    file: SelectedFile,
    registry: Arc<RegistryInner>,
}

impl FileHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        self.registry.open.fetch_sub(1, Ordering::Relaxed);
        debug!("Released handle #{} for {}", self.id, self.file.name());
    }
}
