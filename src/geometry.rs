//! Frame geometry: where a frame lives in its sheet and where it lands in the viewport.

use crate::{FrameRect, FrameSize, Offset, SheetDefinition};

/// Error type for geometry calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A grid dimension was zero
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Frame index past the populated frames (checked mode only)
    #[error("frame {index} is out of range for {frame_count} frames")]
    FrameOutOfRange { index: usize, frame_count: usize },
}

/// Result type for geometry calculations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Calculate the source rectangle of a frame within its sheet.
///
/// Frames are laid out left to right, top to bottom. The frame width is
/// the sheet width divided by `frames_per_row` and the frame height is the
/// sheet height divided by the row count, both truncating.
///
/// The index is not checked against the number of frames actually drawn
/// on the sheet; an index past the grid yields a rectangle outside the
/// image. Offsets saturate rather than wrap. Use
/// [`compute_source_rect_checked`] to reject such indices.
///
/// ## Errors
///
/// `InvalidArgument` when `frames_per_row` or the sheet's explicit row
/// count is zero.
///
/// ## Example
///
/// ```rust
/// use sprite_view_core::{compute_source_rect, FrameRect, SheetDefinition};
///
/// // 3x3 grid of 100x100 frames
/// let sheet = SheetDefinition::new(300, 300, ());
///
/// let rect = compute_source_rect(&sheet, 3, 4).unwrap();
/// assert_eq!(rect, FrameRect { offset_x: 100, offset_y: 100, width: 100, height: 100 });
/// ```
pub fn compute_source_rect<H>(
    sheet: &SheetDefinition<H>,
    frames_per_row: u32,
    frame_index: usize,
) -> GeometryResult<FrameRect> {
    if frames_per_row == 0 {
        return Err(GeometryError::InvalidArgument(
            "frames per row must be positive",
        ));
    }
    let size = sheet
        .frame_size(frames_per_row)
        .ok_or(GeometryError::InvalidArgument(
            "sheet row count must be positive",
        ))?;

    let per_row = frames_per_row as usize;
    let row = frame_index / per_row;
    let column = frame_index % per_row;

    Ok(FrameRect {
        offset_x: scale(column, size.width),
        offset_y: scale(row, size.height),
        width: size.width,
        height: size.height,
    })
}

/// Like [`compute_source_rect`], but rejects indices past the populated frames.
///
/// `frame_count` is the number of frames actually drawn on the sheet. It
/// may be smaller than the grid (a partially filled last row) but not
/// larger.
pub fn compute_source_rect_checked<H>(
    sheet: &SheetDefinition<H>,
    frames_per_row: u32,
    frame_index: usize,
    frame_count: usize,
) -> GeometryResult<FrameRect> {
    if frames_per_row > 0 && frame_count as u64 > sheet.frame_capacity(frames_per_row) {
        return Err(GeometryError::InvalidArgument(
            "frame count exceeds the sheet's grid",
        ));
    }
    let rect = compute_source_rect(sheet, frames_per_row, frame_index)?;
    if frame_index >= frame_count {
        return Err(GeometryError::FrameOutOfRange {
            index: frame_index,
            frame_count,
        });
    }
    Ok(rect)
}

/// Calculate where to draw a frame so it is centered in the viewport.
///
/// Each axis is `(viewport - frame) / 2`, truncated toward zero. When the
/// viewport is sized to the frame, which is the usual setup, the result is
/// `(0, 0)`.
///
/// ## Example
///
/// ```rust
/// use sprite_view_core::{compute_destination_offset, FrameSize, Offset};
///
/// let offset = compute_destination_offset(150.0, 120.0, FrameSize::new(100, 100));
/// assert_eq!(offset, Offset { x: 25, y: 10 });
/// ```
pub fn compute_destination_offset(
    viewport_width: f32,
    viewport_height: f32,
    frame_size: FrameSize,
) -> Offset {
    let x = (viewport_width - frame_size.width as f32) / 2.0;
    let y = (viewport_height - frame_size.height as f32) / 2.0;
    Offset {
        x: x as i32,
        y: y as i32,
    }
}

#[inline]
fn scale(cells: usize, cell_size: u32) -> u32 {
    let pixels = (cells as u64).saturating_mul(u64::from(cell_size));
    u32::try_from(pixels).unwrap_or(u32::MAX)
}
