//! Distance/size compression: pure math, no simulation state.
//!
//! Raw sizes are kilometers. The same curve and reference scale are applied to
//! radii and orbital distances so their proportions shrink together.

use crate::error::{OrreryError, Result};

/// Smallest compression exponent (identity mapping).
pub const MIN_COMPRESSION: f64 = 1.0;

/// Compression exponent `k`, always finite and at least `MIN_COMPRESSION`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CompressionParameter(f64);

impl CompressionParameter {
    /// `k = 1`: display sizes equal physical sizes.
    pub const IDENTITY: Self = Self(MIN_COMPRESSION);

    /// Build a parameter from untrusted input.
    ///
    /// Values below 1 (and -inf) clamp to 1. Finite values above 1 are kept
    /// unless an optional `max` is configured. NaN maps to the identity, and
    /// so does +inf when there is no `max` to clamp it to.
    pub fn clamped(value: f64, max: Option<f64>) -> Self {
        let max = max.filter(|m| m.is_finite()).map(|m| m.max(MIN_COMPRESSION));
        let k = if value.is_nan() {
            MIN_COMPRESSION
        } else if value == f64::INFINITY {
            max.unwrap_or(MIN_COMPRESSION)
        } else {
            let k = value.max(MIN_COMPRESSION);
            max.map_or(k, |m| k.min(m))
        };
        if k != value {
            log::warn!("compression {value} out of range, clamped to {k}");
        }
        Self(k)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for CompressionParameter {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `size^(1/k) + R - R^(1/k)`.
///
/// Monotonic in `size` for every valid `k`, and exactly `size` when `k = 1`.
pub fn compress(size: f64, k: CompressionParameter, reference: f64) -> Result<f64> {
    // `!(size >= 0)` also rejects NaN
    if !(size >= 0.0) {
        return Err(OrreryError::NegativeSize(size));
    }
    let k = k.get();
    if k == MIN_COMPRESSION {
        return Ok(size);
    }
    let inv = 1.0 / k;
    Ok(size.powf(inv) + (reference - reference.powf(inv)))
}
