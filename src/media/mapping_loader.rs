use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::mapping::MappingTable;

/// Resolves the mapping table on a worker thread so startup waits on IO for a bounded time only.
///
/// The result is always a table: failures have already been turned into the
/// default mapping by [`MappingTable::load_or_fallback`].
pub struct MappingLoader {
    result: Arc<Mutex<Option<MappingTable>>>,
}

impl MappingLoader {
    /// Start fetching `source` in the background
    pub fn spawn(source: String, total_images: u32) -> Self {
        let result = Arc::new(Mutex::new(None));
        let thread_result = Arc::clone(&result);

        let spawned = std::thread::Builder::new()
            .name("mapping-loader".to_owned())
            .spawn(move || {
                let table = MappingTable::load_or_fallback(&source, total_images);
                if let Ok(mut slot) = thread_result.lock() {
                    *slot = Some(table);
                }
            });

        if let Err(e) = spawned {
            log::error!("Failed to start mapping loader thread: {e}");
            if let Ok(mut slot) = result.lock() {
                *slot = Some(MappingTable::fallback(total_images));
            }
        }

        Self { result }
    }

    fn try_take(&self) -> Option<MappingTable> {
        self.result.lock().ok()?.take()
    }

    /// Wait at most `timeout` for the worker. `None` if it is still busy.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<MappingTable> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(table) = self.try_take() {
                return Some(table);
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    /// Mapping for a new session: the loaded table if it settles within
    /// `timeout`, otherwise the default table. A late result is dropped.
    pub fn resolve_within(source: String, total_images: u32, timeout: Duration) -> MappingTable {
        Self::spawn(source, total_images)
            .wait_timeout(timeout)
            .unwrap_or_else(|| {
                log::warn!(
                    "Mapping not ready after {} ms, using default mapping",
                    timeout.as_millis()
                );
                MappingTable::fallback(total_images)
            })
    }
}

impl std::fmt::Debug for MappingLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingLoader").finish_non_exhaustive()
    }
}
