//! Process-wide font cache with single-flight loading.
//!
//! Each resource path moves through `Unloaded -> Loading -> Loaded | Failed`.
//! Concurrent acquirers of a path that is already loading await the same
//! shared future, so the underlying fetch runs at most once per path until
//! the entry is explicitly reset. The map lock is never held across an await.

use crate::fonts::{EmbeddedFont, FontHandle};
use casedoc_traits::{FontSource, ResourceError};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

type LoadFuture = Shared<BoxFuture<'static, Result<FontHandle, ResourceError>>>;

enum Entry {
    Loading(LoadFuture),
    Loaded(FontHandle),
    Failed(ResourceError),
}

/// Observable state of one resource path.
#[derive(Debug, Clone, PartialEq)]
pub enum FontState {
    Unloaded,
    Loading,
    Loaded,
    Failed(ResourceError),
}

pub struct FontResourceCache {
    source: Arc<dyn FontSource>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl std::fmt::Debug for FontResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResourceCache")
            .field("source", &self.source.name())
            .finish()
    }
}

impl FontResourceCache {
    pub fn new(source: Arc<dyn FontSource>) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, ResourceError> {
        self.entries.lock().map_err(|_| ResourceError::LoadFailed {
            path: String::new(),
            message: "font cache lock poisoned".to_string(),
        })
    }

    /// Returns the font stored under `resource_path`, loading it on first use.
    ///
    /// A previous failure is returned as-is without touching the source again.
    pub async fn acquire(
        &self,
        resource_path: &str,
        registered_name: &str,
    ) -> Result<FontHandle, ResourceError> {
        let pending = {
            let mut entries = self.lock()?;
            match entries.get(resource_path) {
                Some(Entry::Loaded(handle)) => return Ok(handle.clone()),
                Some(Entry::Failed(err)) => return Err(err.clone()),
                Some(Entry::Loading(pending)) => {
                    log::debug!("Joining in-flight load of '{}'", resource_path);
                    pending.clone()
                }
                None => {
                    log::debug!(
                        "Loading font '{}' from {} via {}",
                        registered_name,
                        resource_path,
                        self.source.name()
                    );
                    let pending = load(
                        self.source.clone(),
                        resource_path.to_string(),
                        registered_name.to_string(),
                    )
                    .boxed()
                    .shared();
                    entries.insert(resource_path.to_string(), Entry::Loading(pending.clone()));
                    pending
                }
            }
        };

        let outcome = pending.clone().await;
        self.settle(resource_path, &pending, &outcome);
        outcome
    }

    /// Like `acquire`, but substitutes the built-in font on failure.
    pub async fn acquire_or_default(&self, resource_path: &str, registered_name: &str) -> FontHandle {
        match self.acquire(resource_path, registered_name).await {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!(
                    "Font '{}' unavailable ({}); falling back to built-in Helvetica",
                    registered_name,
                    err
                );
                FontHandle::builtin()
            }
        }
    }

    // Records the outcome unless the entry was reset or replaced meanwhile.
    fn settle(
        &self,
        resource_path: &str,
        pending: &LoadFuture,
        outcome: &Result<FontHandle, ResourceError>,
    ) {
        let Ok(mut entries) = self.lock() else {
            return;
        };
        let Some(entry) = entries.get_mut(resource_path) else {
            return;
        };
        if let Entry::Loading(current) = entry
            && current.ptr_eq(pending)
        {
            *entry = match outcome {
                Ok(handle) => Entry::Loaded(handle.clone()),
                Err(err) => {
                    log::warn!("Failed to load font resource '{}': {}", resource_path, err);
                    Entry::Failed(err.clone())
                }
            };
        }
    }

    pub fn state(&self, resource_path: &str) -> FontState {
        let Ok(entries) = self.lock() else {
            return FontState::Unloaded;
        };
        match entries.get(resource_path) {
            None => FontState::Unloaded,
            Some(Entry::Loading(_)) => FontState::Loading,
            Some(Entry::Loaded(_)) => FontState::Loaded,
            Some(Entry::Failed(err)) => FontState::Failed(err.clone()),
        }
    }

    /// Forgets one path so the next `acquire` fetches it again.
    pub fn reset(&self, resource_path: &str) {
        if let Ok(mut entries) = self.lock() {
            entries.remove(resource_path);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.lock() {
            entries.clear();
        }
    }
}

async fn load(
    source: Arc<dyn FontSource>,
    resource_path: String,
    registered_name: String,
) -> Result<FontHandle, ResourceError> {
    let data = source.fetch(&resource_path).await?;
    let font = EmbeddedFont::decode(data, &registered_name)?;
    log::info!(
        "Loaded font '{}' ({}) from {}",
        registered_name,
        font.postscript_name,
        resource_path
    );
    Ok(FontHandle::Embedded(Arc::new(font)))
}
