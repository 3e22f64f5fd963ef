//! Screen width classification and the width provider seam.

use std::fmt;
use std::str::FromStr;

/// Coarse screen size bucket derived from a width.
///
/// Variants are ordered by increasing width threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScreenCategory {
    /// Up to 360 wide
    Small,
    /// 361 to 600 wide
    Normal,
    /// 601 to 800 wide
    Large,
    /// Anything wider than 800
    Tablet,
}

impl ScreenCategory {
    /// All categories in priority order.
    pub const ALL: [ScreenCategory; 4] = [
        ScreenCategory::Small,
        ScreenCategory::Normal,
        ScreenCategory::Large,
        ScreenCategory::Tablet,
    ];

    /// Inclusive upper width of this bucket. `Tablet` is unbounded.
    #[inline]
    pub fn upper_bound(self) -> Option<i32> {
        match self {
            ScreenCategory::Small => Some(360),
            ScreenCategory::Normal => Some(600),
            ScreenCategory::Large => Some(800),
            ScreenCategory::Tablet => None,
        }
    }

    /// Lower-case key used in manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenCategory::Small => "small",
            ScreenCategory::Normal => "normal",
            ScreenCategory::Large => "large",
            ScreenCategory::Tablet => "tablet",
        }
    }
}

impl fmt::Display for ScreenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `small`, `normal`, `large`, `tablet`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown screen category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for ScreenCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(ScreenCategory::Small),
            "normal" => Ok(ScreenCategory::Normal),
            "large" => Ok(ScreenCategory::Large),
            "tablet" => Ok(ScreenCategory::Tablet),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Classify a screen width.
///
/// Ranges are half-open with an inclusive upper bound, so 360 is `Small`
/// and 600 is `Normal`. Negative widths are `Small`.
///
/// ## Example
///
/// ```rust
/// use sprite_view_core::{classify, ScreenCategory};
///
/// assert_eq!(classify(320), ScreenCategory::Small);
/// assert_eq!(classify(360), ScreenCategory::Small);
/// assert_eq!(classify(361), ScreenCategory::Normal);
/// assert_eq!(classify(1024), ScreenCategory::Tablet);
/// ```
pub fn classify(width: i32) -> ScreenCategory {
    match width {
        i32::MIN..=360 => ScreenCategory::Small,
        361..=600 => ScreenCategory::Normal,
        601..=800 => ScreenCategory::Large,
        _ => ScreenCategory::Tablet,
    }
}

/// Supplies the current screen width.
///
/// Implement this for your platform's measurement mechanism. The core
/// never measures anything itself.
pub trait ScreenWidthProvider {
    /// Current width in logical pixels.
    fn screen_width(&self) -> i32;
}

/// A fixed width.
impl ScreenWidthProvider for i32 {
    #[inline]
    fn screen_width(&self) -> i32 {
        *self
    }
}

impl<F> ScreenWidthProvider for F
where
    F: Fn() -> i32,
{
    #[inline]
    fn screen_width(&self) -> i32 {
        self()
    }
}

/// Browser window measurement.
#[cfg(feature = "web")]
pub mod web {
    use super::ScreenWidthProvider;

    /// Reads `window.innerWidth`.
    ///
    /// Reports 0 (and therefore `Small`) when there is no window or the
    /// width is not a number.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct WindowWidth;

    impl ScreenWidthProvider for WindowWidth {
        fn screen_width(&self) -> i32 {
            let Some(window) = web_sys::window() else {
                log::warn!("no window available, reporting zero width");
                return 0;
            };
            window
                .inner_width()
                .ok()
                .and_then(|value: wasm_bindgen::JsValue| value.as_f64())
                .map(|width| width as i32)
                .unwrap_or(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_range() {
        for width in [-50, 0, 1, 200, 359, 360] {
            assert_eq!(classify(width), ScreenCategory::Small, "width {width}");
        }
    }

    #[test]
    fn test_normal_range() {
        for width in [361, 480, 599, 600] {
            assert_eq!(classify(width), ScreenCategory::Normal, "width {width}");
        }
    }

    #[test]
    fn test_large_range() {
        for width in [601, 700, 800] {
            assert_eq!(classify(width), ScreenCategory::Large, "width {width}");
        }
    }

    #[test]
    fn test_tablet_range() {
        for width in [801, 1280, i32::MAX] {
            assert_eq!(classify(width), ScreenCategory::Tablet, "width {width}");
        }
    }

    #[test]
    fn test_boundaries_pick_lower_bucket() {
        assert_eq!(classify(360), ScreenCategory::Small);
        assert_eq!(classify(600), ScreenCategory::Normal);
        assert_eq!(classify(800), ScreenCategory::Large);
    }

    #[test]
    fn test_upper_bounds_agree_with_classify() {
        for category in ScreenCategory::ALL {
            if let Some(bound) = category.upper_bound() {
                assert_eq!(classify(bound), category);
                assert!(classify(bound + 1) > category);
            }
        }
    }

    #[test]
    fn test_parse_and_display() {
        for category in ScreenCategory::ALL {
            let parsed: ScreenCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert_eq!(
            " Tablet ".parse::<ScreenCategory>(),
            Ok(ScreenCategory::Tablet)
        );
        assert!("phone".parse::<ScreenCategory>().is_err());
    }

    #[test]
    fn test_providers() {
        assert_eq!(480_i32.screen_width(), 480);
        let measure = || 1024_i32;
        assert_eq!(measure.screen_width(), 1024);
    }
}
