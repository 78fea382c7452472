// store/images.rs
use base64::Engine;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::ImageHandle;
use crate::errors::ServerError;

/// An uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Total photo bytes held when no limit is configured.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 512 * 1024 * 1024;

#[derive(Default)]
struct Inner {
    images: HashMap<ImageHandle, Arc<StoredImage>>,
    uploads: u64,
    bytes_held: u64,
}

/// Process-local photo storage. Handles stay valid for the life of the
/// process; once `max_bytes` are held further uploads are refused.
pub struct ImageStore {
    inner: RwLock<Inner>,
    max_bytes: u64,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_IMAGE_BYTES)
    }
}

impl ImageStore {
    pub fn with_limit(max_bytes: u64) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_bytes,
        }
    }

    /// Stores one upload and returns its handle.
    ///
    /// Handles are a digest prefix plus an upload sequence number, so the
    /// same photo uploaded twice gets two handles.
    pub fn put(&self, content_type: &str, bytes: Vec<u8>) -> Result<ImageHandle, ServerError> {
        let parsed: mime::Mime = content_type
            .parse()
            .map_err(|_| ServerError::BadRequest(format!("Invalid content type {content_type:?}")))?;
        if parsed.type_() != mime::IMAGE {
            return Err(ServerError::BadRequest(format!(
                "Expected an image upload, got {parsed}"
            )));
        }
        if bytes.is_empty() {
            return Err(ServerError::BadRequest("Empty image upload".into()));
        }

        let digest = Sha256::digest(&bytes);
        let prefix = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&digest[..12]);

        let mut inner = self.inner.write().map_err(|_| ServerError::InternalError)?;
        let size = bytes.len() as u64;
        if inner.bytes_held.saturating_add(size) > self.max_bytes {
            tracing::warn!(held = inner.bytes_held, size, "image storage full");
            return Err(ServerError::BadRequest("Image storage is full".into()));
        }
        inner.bytes_held += size;
        inner.uploads += 1;
        let handle = ImageHandle::new(format!("{prefix}-{}", inner.uploads));
        inner.images.insert(
            handle.clone(),
            Arc::new(StoredImage {
                content_type: parsed.essence_str().to_string(),
                bytes,
            }),
        );

        Ok(handle)
    }

    pub fn get(&self, handle: &ImageHandle) -> Result<Option<Arc<StoredImage>>, ServerError> {
        let inner = self.inner.read().map_err(|_| ServerError::InternalError)?;
        Ok(inner.images.get(handle).cloned())
    }

    /// Looks up every handle, skipping ones this process never stored.
    pub fn resolve(&self, handles: &[ImageHandle]) -> Result<Vec<Arc<StoredImage>>, ServerError> {
        let inner = self.inner.read().map_err(|_| ServerError::InternalError)?;
        Ok(handles
            .iter()
            .filter_map(|h| inner.images.get(h).cloned())
            .collect())
    }
}
