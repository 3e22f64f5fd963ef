//! Sprite configuration as data.
//!
//! A manifest names sheet assets instead of holding decoded images, so it
//! can live in a `.toml` file next to the art. An [`ImageLoader`] turns it
//! into a [`SpriteSpec`].

use std::collections::BTreeMap;

use crate::screen::{ScreenCategory, UnknownCategory};
use crate::{ImageLoader, SheetDefinition, SpriteSpec, SpriteView};

/// Error type for manifest validation and loading.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("frames_per_row must be positive")]
    InvalidFramesPerRow,
    #[error("sheet {asset:?} has invalid dimensions {width}x{height}")]
    InvalidDimensions {
        asset: String,
        width: u32,
        height: u32,
    },
    #[error("sheet {asset:?} must have at least one row")]
    InvalidRows { asset: String },
    #[error("frame_count must be positive")]
    EmptyFrameCount,
    #[error("sheet {asset:?} holds {capacity} frames, fewer than frame_count {frame_count}")]
    FrameCountExceedsGrid {
        asset: String,
        frame_count: usize,
        capacity: u64,
    },
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    #[error("more than one sheet for {0}")]
    DuplicateCategory(ScreenCategory),
    #[error("failed to load {asset:?}: {message}")]
    Load { asset: String, message: String },
    #[cfg(feature = "toml")]
    #[error("invalid manifest: {0}")]
    Toml(#[from] toml::de::Error),
}

/// One sheet asset as written in a manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetEntry {
    /// Asset identifier passed to the image loader
    pub image: String,
    /// Width of the whole sheet in pixels
    pub width: u32,
    /// Height of the whole sheet in pixels
    pub height: u32,
    /// Row count, when the grid is not square
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rows: Option<u32>,
}

impl SheetEntry {
    /// Create an entry with a square grid of frames.
    pub fn new(image: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            image: image.into(),
            width,
            height,
            rows: None,
        }
    }

    fn validate(
        &self,
        frames_per_row: u32,
        frame_count: Option<usize>,
    ) -> Result<(), ManifestError> {
        if self.width == 0 || self.height == 0 {
            return Err(ManifestError::InvalidDimensions {
                asset: self.image.clone(),
                width: self.width,
                height: self.height,
            });
        }
        if self.rows == Some(0) {
            return Err(ManifestError::InvalidRows {
                asset: self.image.clone(),
            });
        }
        if let Some(frame_count) = frame_count {
            let rows = self.rows.unwrap_or(frames_per_row);
            let capacity = u64::from(frames_per_row) * u64::from(rows);
            if frame_count as u64 > capacity {
                return Err(ManifestError::FrameCountExceedsGrid {
                    asset: self.image.clone(),
                    frame_count,
                    capacity,
                });
            }
        }
        Ok(())
    }

    fn load<L: ImageLoader>(
        &self,
        loader: &L,
    ) -> Result<SheetDefinition<L::Handle>, ManifestError> {
        let image = loader.load(&self.image).map_err(|message| ManifestError::Load {
            asset: self.image.clone(),
            message,
        })?;
        Ok(SheetDefinition {
            pixel_width: self.width,
            pixel_height: self.height,
            rows: self.rows,
            image,
        })
    }
}

/// A responsive sprite described by asset names.
///
/// ```toml
/// frames_per_row = 3
/// frame_count = 9
///
/// [default]
/// image = "walk@2x.png"
/// width = 600
/// height = 600
///
/// [sheets.small]
/// image = "walk.png"
/// width = 300
/// height = 300
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteManifest {
    /// Frames in each row of every sheet
    pub frames_per_row: u32,
    /// Frames actually drawn, when the last row is partial
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub frame_count: Option<usize>,
    /// Sheet used when no category-specific one applies
    pub default: SheetEntry,
    /// Category-specific sheets keyed by `small`, `normal`, `large` or `tablet`
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "BTreeMap::is_empty"))]
    pub sheets: BTreeMap<String, SheetEntry>,
}

impl SpriteManifest {
    /// Create a manifest with only a default sheet.
    pub fn new(frames_per_row: u32, default: SheetEntry) -> Self {
        Self {
            frames_per_row,
            frame_count: None,
            default,
            sheets: BTreeMap::new(),
        }
    }

    /// Add a category-specific sheet.
    pub fn with_sheet(mut self, category: ScreenCategory, entry: SheetEntry) -> Self {
        self.sheets.insert(category.to_string(), entry);
        self
    }

    /// Parse a manifest from a TOML string.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(s)?)
    }

    /// Category-specific entries with their keys parsed.
    ///
    /// Keys are matched case-insensitively, so `Small` and `small` name the
    /// same category and may not both be present.
    pub fn categorized(&self) -> Result<Vec<(ScreenCategory, &SheetEntry)>, ManifestError> {
        let mut entries: Vec<(ScreenCategory, &SheetEntry)> = Vec::new();
        for (key, entry) in &self.sheets {
            let category = key.parse::<ScreenCategory>()?;
            if entries.iter().any(|(seen, _)| *seen == category) {
                return Err(ManifestError::DuplicateCategory(category));
            }
            entries.push((category, entry));
        }
        Ok(entries)
    }

    /// Check the manifest without loading anything.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.frames_per_row == 0 {
            return Err(ManifestError::InvalidFramesPerRow);
        }
        if self.frame_count == Some(0) {
            return Err(ManifestError::EmptyFrameCount);
        }
        self.default.validate(self.frames_per_row, self.frame_count)?;
        for (_, entry) in self.categorized()? {
            entry.validate(self.frames_per_row, self.frame_count)?;
        }
        Ok(())
    }

    /// Validate, load every sheet image and build the spec.
    pub fn to_spec<L: ImageLoader>(
        &self,
        loader: &L,
    ) -> Result<SpriteSpec<L::Handle>, ManifestError> {
        self.validate()?;

        log::debug!("loading default sheet {:?}", self.default.image);
        let mut spec = SpriteSpec::new(self.default.load(loader)?);
        for (category, entry) in self.categorized()? {
            log::debug!("loading {category} sheet {:?}", entry.image);
            spec = spec.with_sheet(category, entry.load(loader)?);
        }
        Ok(spec)
    }

    /// Build a ready-to-draw view, enforcing `frame_count` when present.
    pub fn to_view<L: ImageLoader>(
        &self,
        loader: &L,
    ) -> Result<SpriteView<L::Handle>, ManifestError> {
        let view = SpriteView::new(self.to_spec(loader)?, self.frames_per_row);
        Ok(match self.frame_count {
            Some(count) => view.with_frame_count(count),
            None => view,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PreloadedImages;

    fn manifest() -> SpriteManifest {
        SpriteManifest::new(3, SheetEntry::new("walk@2x.png", 600, 600))
            .with_sheet(ScreenCategory::Small, SheetEntry::new("walk.png", 300, 300))
    }

    fn images() -> PreloadedImages<u32> {
        PreloadedImages::new()
            .with("walk.png", 1)
            .with("walk@2x.png", 2)
    }

    #[test]
    fn test_to_spec() {
        let spec = manifest().to_spec(&images()).unwrap();
        assert_eq!(spec.resolve(ScreenCategory::Small).image, 1);
        assert_eq!(spec.resolve(ScreenCategory::Small).pixel_width, 300);
        assert_eq!(spec.resolve(ScreenCategory::Tablet).image, 2);
        assert_eq!(spec.default_sheet().pixel_height, 600);
    }

    #[test]
    fn test_to_view() {
        let mut manifest = manifest();
        manifest.frame_count = Some(8);
        let mut view = manifest.to_view(&images()).unwrap();

        assert_eq!(view.frames_per_row(), 3);
        assert_eq!(view.frame_count(), Some(8));
        let cmd = view.draw_fitted(&320_i32, &7usize).unwrap();
        assert_eq!(cmd.image, 1);
        assert_eq!((cmd.source.offset_x, cmd.source.offset_y), (100, 200));
        assert!(view.draw_fitted(&320_i32, &8usize).is_err());
    }

    #[test]
    fn test_rows_carried_over() {
        let mut strip = SheetEntry::new("walk.png", 400, 100);
        strip.rows = Some(1);
        let spec = SpriteManifest::new(4, strip).to_spec(&images()).unwrap();
        assert_eq!(spec.default_sheet().rows, Some(1));
    }

    #[test]
    fn test_zero_frames_per_row() {
        let mut manifest = manifest();
        manifest.frames_per_row = 0;
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidFramesPerRow)
        ));
    }

    #[test]
    fn test_zero_dimensions() {
        let manifest = manifest().with_sheet(
            ScreenCategory::Large,
            SheetEntry::new("big.png", 0, 10),
        );
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidDimensions { ref asset, .. }) if asset == "big.png"
        ));
    }

    #[test]
    fn test_zero_rows_reported_separately() {
        let mut strip = SheetEntry::new("strip.png", 300, 300);
        strip.rows = Some(0);
        let err = manifest()
            .with_sheet(ScreenCategory::Normal, strip)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ManifestError::InvalidRows { ref asset } if asset == "strip.png"));
        assert!(!err.to_string().contains("300x300"));
    }

    #[test]
    fn test_zero_frame_count() {
        let mut manifest = manifest();
        manifest.frame_count = Some(0);
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::EmptyFrameCount)
        ));
        assert!(manifest.to_view(&images()).is_err());
    }

    #[test]
    fn test_frame_count_larger_than_grid() {
        let mut manifest = manifest();
        manifest.frame_count = Some(50);
        let err = manifest.validate().unwrap_err();
        assert!(matches!(
            err,
            ManifestError::FrameCountExceedsGrid {
                frame_count: 50,
                capacity: 9,
                ..
            }
        ));
        assert!(manifest.to_view(&images()).is_err());

        manifest.frame_count = Some(9);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_frame_count_checked_against_every_sheet() {
        // 3x3 default, but the small sheet is a single strip of 3
        let mut strip = SheetEntry::new("walk.png", 300, 100);
        strip.rows = Some(1);
        let mut manifest = manifest().with_sheet(ScreenCategory::Small, strip);
        manifest.frame_count = Some(4);
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::FrameCountExceedsGrid { ref asset, capacity: 3, .. })
                if asset == "walk.png"
        ));
    }

    #[test]
    fn test_unknown_category() {
        let mut manifest = manifest();
        manifest
            .sheets
            .insert("phone".to_string(), SheetEntry::new("walk.png", 300, 300));
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_duplicate_category_keys() {
        let mut manifest = manifest();
        manifest.sheets.insert(
            "Small".to_string(),
            SheetEntry::new("walk@2x.png", 600, 600),
        );
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::DuplicateCategory(ScreenCategory::Small))
        ));
        assert!(manifest.to_spec(&images()).is_err());
    }

    #[test]
    fn test_missing_image() {
        let manifest = manifest().with_sheet(
            ScreenCategory::Tablet,
            SheetEntry::new("huge.png", 900, 900),
        );
        let err = manifest.to_spec(&images()).unwrap_err();
        assert!(matches!(err, ManifestError::Load { ref asset, .. } if asset == "huge.png"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_str() {
        let manifest = SpriteManifest::from_toml_str(
            r#"
            frames_per_row = 3
            frame_count = 8

            [default]
            image = "walk@2x.png"
            width = 600
            height = 600

            [sheets.small]
            image = "walk.png"
            width = 300
            height = 300
            rows = 3
            "#,
        )
        .unwrap();

        assert_eq!(manifest.frames_per_row, 3);
        assert_eq!(manifest.frame_count, Some(8));
        assert_eq!(manifest.default, SheetEntry::new("walk@2x.png", 600, 600));
        assert_eq!(manifest.sheets["small"].rows, Some(3));
        assert!(manifest.to_spec(&images()).is_ok());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_str_missing_default() {
        let parsed = SpriteManifest::from_toml_str("frames_per_row = 3");
        let err = parsed.unwrap_err();
        assert!(matches!(err, ManifestError::Toml(_)));
    }
}
