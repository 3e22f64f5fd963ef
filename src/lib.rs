//! # sprite-view-core
//!
//! Responsive sprite sheet frame selection for animation playback.
//!
//! This crate provides platform-agnostic logic for:
//! - Classifying a screen width into a size category
//! - Picking the sprite sheet exported for that category
//! - Locating the current frame within the sheet
//! - Centering the frame in the output viewport
//!
//! Measuring the screen, decoding images, advancing frames and drawing
//! pixels are left to the host through small traits.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load [`SpriteManifest`]s from TOML
//! - `web` - Read the screen width from the browser window
//!
//! ## Example
//!
//! ```rust
//! use sprite_view_core::{SheetDefinition, SpriteSpec, SpriteView, Viewport};
//!
//! // A 3x3 sheet, plus a smaller export for phones
//! let spec = SpriteSpec::new(SheetDefinition::new(300, 300, "walk@2x.png"))
//!     .with_small(SheetDefinition::new(150, 150, "walk.png"));
//!
//! let mut view = SpriteView::new(spec, 3);
//! let screen_width: i32 = 1024;
//! let current_frame: usize = 4;
//!
//! let cmd = view.draw(&screen_width, &current_frame, Viewport::new(150.0, 120.0)).unwrap();
//! assert_eq!(cmd.image, "walk@2x.png");
//! assert_eq!((cmd.source.offset_x, cmd.source.offset_y), (100, 100));
//! assert_eq!((cmd.destination.x, cmd.destination.y), (25, 10));
//! ```

mod animation;
mod data;
pub mod geometry;
mod loader;
mod manifest;
pub mod render;
pub mod screen;

pub use animation::AnimationCursor;
pub use data::{FrameRect, FrameSize, Offset, SheetDefinition, SpriteSpec, Viewport};
pub use geometry::{
    compute_destination_offset, compute_source_rect, compute_source_rect_checked, GeometryError,
};
pub use loader::{ImageLoader, LoadResult, PreloadedImages};
pub use manifest::{ManifestError, SheetEntry, SpriteManifest};
pub use render::{draw_command, DrawCommand, SpriteView};
pub use screen::{classify, ScreenCategory, ScreenWidthProvider, UnknownCategory};

#[cfg(feature = "web")]
pub use screen::web::WindowWidth;
