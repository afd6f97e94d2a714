//! # Geometry Helpers
//!
//! Clamping plus reading and writing the split point as a CSS custom property
//! on the document root.
//!
//! ## Example
//!
//! ```rust
//! use split_core::geometry::{clamp, SplitProperty};
//! use split_core::host::MemoryStyle;
//! use split_core::units::Pixels;
//!
//! assert_eq!(clamp(-200, 0, 1000), 0);
//!
//! let style = MemoryStyle::new(Pixels(1000));
//! let split = SplitProperty::default();
//! split.center(&style).unwrap();
//! assert_eq!(split.get(&style).unwrap(), Pixels(500));
//! ```

use crate::errors::{SplitError, SplitResult};
use crate::host::StyleHost;
use crate::units::Pixels;

/// Default name of the root custom property holding the split point
pub const DEFAULT_SPLIT_PROPERTY: &str = "--split-point";

/// Constrain `value` to `[min, max]`.
///
/// Total for any input: `max` is applied after `min`, so an inverted range
/// yields `max` instead of panicking like `Ord::clamp`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let value = if value < min { min } else { value };
    if value > max {
        max
    } else {
        value
    }
}

/// Parse a CSS pixel length the way `parseInt` reads it: optional leading
/// whitespace and sign, then digits; anything after the digits is ignored.
///
/// Negative offsets are rejected since the split point lives in
/// `[0, viewport]`.
pub fn parse_pixels(raw: &str) -> SplitResult<Pixels> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(SplitError::malformed_position(raw, "no leading digits"));
    }

    let value: i32 = unsigned[..digits_len]
        .parse()
        .map_err(|e| SplitError::malformed_position(raw, format!("{}", e)))?;

    if negative && value != 0 {
        return Err(SplitError::malformed_position(raw, "negative offset"));
    }
    Ok(Pixels(value))
}

/// Handle on the custom property that stores the split point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitProperty {
    name: String,
}

impl SplitProperty {
    pub fn new(name: impl Into<String>) -> Self {
        SplitProperty { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the current split point.
    ///
    /// Fails with `MissingProperty` when unset and `MalformedPosition` when
    /// unparseable; callers pick a default (see
    /// [`SplitError::is_position_fallback`]).
    pub fn get(&self, host: &impl StyleHost) -> SplitResult<Pixels> {
        let raw = host
            .read_property(&self.name)?
            .ok_or_else(|| SplitError::missing_property(&self.name))?;
        parse_pixels(&raw)
    }

    /// Write the split point as `<int>px`.
    pub fn set(&self, host: &impl StyleHost, value: Pixels) -> SplitResult<()> {
        host.write_property(&self.name, &value.to_string())
    }

    /// Move the split point to half the current viewport width.
    pub fn center(&self, host: &impl StyleHost) -> SplitResult<Pixels> {
        let center = host.viewport_width()?.half();
        self.set(host, center)?;
        Ok(center)
    }
}

impl Default for SplitProperty {
    fn default() -> Self {
        SplitProperty::new(DEFAULT_SPLIT_PROPERTY)
    }
}
