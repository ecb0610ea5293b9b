//! Validated element geometry read back from a layout host.
//!
//! A forced layout is only meaningful if the engine returned real numbers, so
//! every box read back from a host goes through [`ValidatedRect`]:
//! - all coordinates are finite (no NaN, no Infinity)
//! - width and height are non-negative
//!
//! ```rust
//! use layoutbench_core::validated_rect::ValidatedRect;
//!
//! let rect = ValidatedRect::new(0.0, 0.0, 1280.0, 280_028.0).unwrap();
//! assert_eq!(rect.offset_height(), 280_028.0);
//!
//! assert!(ValidatedRect::new(f32::NAN, 0.0, 10.0, 10.0).is_err());
//! ```

use crate::error::ValidationError;

/// Element box with guaranteed finite, non-negative dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl ValidatedRect {
    /// Create a new validated rectangle.
    ///
    /// # Errors
    ///
    /// * `ValidationError::NonFiniteValue` - If any value is NaN or Infinity
    /// * `ValidationError::NegativeDimension` - If width or height < 0.0
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, ValidationError> {
        if !x.is_finite() || !y.is_finite() || !width.is_finite() || !height.is_finite() {
            return Err(ValidationError::NonFiniteValue);
        }

        if width < 0.0 || height < 0.0 {
            return Err(ValidationError::NegativeDimension { width, height });
        }

        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Create a validated rectangle from Taffy layout output.
    pub fn from_taffy(layout: &taffy::Layout) -> Result<Self, ValidationError> {
        Self::new(
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
        )
    }

    /// X position relative to the parent box.
    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Y position relative to the parent box.
    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Border-box height, the value a DOM `offsetHeight` read returns.
    #[inline]
    pub fn offset_height(&self) -> f32 {
        self.height
    }
}
