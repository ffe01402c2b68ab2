use std::fmt;

use serde::{Deserialize, Serialize};

/// Length measurement normalised to points.
///
/// Writer and Calc store lengths in twips (1/20 pt); drawing and chart
/// streams use hundredths of a millimetre.
///
/// # Examples
///
/// ```rust
/// use stardoc::common::Length;
///
/// let length = Length::from_twips(240);
/// assert_eq!(length.points(), 12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Length {
    points: f64,
}

const POINTS_PER_INCH: f64 = 72.0;
const MM_PER_INCH: f64 = 25.4;

impl Length {
    #[inline]
    pub const fn from_points(points: f64) -> Self {
        Self { points }
    }

    /// Create a length from twips (1/1440 inch).
    #[inline]
    pub fn from_twips(twips: i64) -> Self {
        Self {
            points: twips as f64 / 20.0,
        }
    }

    /// Create a length from hundredths of a millimetre.
    #[inline]
    pub fn from_hundredth_mm(value: i64) -> Self {
        Self {
            points: value as f64 / 100.0 / MM_PER_INCH * POINTS_PER_INCH,
        }
    }

    #[inline]
    pub fn points(&self) -> f64 {
        self.points
    }

    #[inline]
    pub fn inches(&self) -> f64 {
        self.points / POINTS_PER_INCH
    }

    #[inline]
    pub fn cm(&self) -> f64 {
        self.inches() * MM_PER_INCH / 10.0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.points)
    }
}
