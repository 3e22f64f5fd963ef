//! Image resource loading seam.
//!
//! Sheets reference decoded images through an opaque handle. This module
//! defines how a host hands those handles to the crate; decoding and
//! caching stay on the host side.

use std::collections::HashMap;

/// Result type for image loading operations
pub type LoadResult<T> = Result<T, String>;

/// Trait for image resource providers.
///
/// Implement this trait on top of your engine's asset system (textures,
/// bitmaps, `HtmlImageElement`s, ...). The handle is cloned into every
/// draw command, so it should be cheap to clone: an id, an `Rc` or an
/// `Arc`.
pub trait ImageLoader {
    /// Decoded image handle
    type Handle: Clone;

    /// Load the image identified by `asset`.
    fn load(&self, asset: &str) -> LoadResult<Self::Handle>;
}

impl<H, F> ImageLoader for F
where
    H: Clone,
    F: Fn(&str) -> LoadResult<H>,
{
    type Handle = H;

    fn load(&self, asset: &str) -> LoadResult<H> {
        self(asset)
    }
}

/// Loader backed by a map of preloaded handles.
///
/// Handy when the host decodes everything up front.
#[derive(Clone, Debug)]
pub struct PreloadedImages<H> {
    images: HashMap<String, H>,
}

impl<H> Default for PreloadedImages<H> {
    fn default() -> Self {
        Self {
            images: HashMap::new(),
        }
    }
}

impl<H: Clone> PreloadedImages<H> {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoded image under `asset`
    pub fn insert(&mut self, asset: impl Into<String>, handle: H) {
        self.images.insert(asset.into(), handle);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, asset: impl Into<String>, handle: H) -> Self {
        self.insert(asset, handle);
        self
    }

    /// Number of registered images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if no images are registered
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl<H: Clone> ImageLoader for PreloadedImages<H> {
    type Handle = H;

    fn load(&self, asset: &str) -> LoadResult<H> {
        self.images
            .get(asset)
            .cloned()
            .ok_or_else(|| format!("image not preloaded: {asset}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preloaded_images() {
        let images = PreloadedImages::new()
            .with("hero.png", 7u32)
            .with("hero@2x.png", 8u32);
        assert_eq!(images.len(), 2);
        assert_eq!(images.load("hero.png"), Ok(7));
        assert_eq!(images.load("hero@2x.png"), Ok(8));
        let err = images.load("villain.png").unwrap_err();
        assert!(err.contains("villain.png"));
    }

    #[test]
    fn test_closure_loader() {
        let loader = |asset: &str| -> LoadResult<usize> { Ok(asset.len()) };
        assert_eq!(loader.load("abc"), Ok(3));
    }
}
