use crate::error::ScaleError;
use std::fmt;
use std::str::FromStr;

/// Multiplier applied to both image dimensions.
///
/// Always finite and strictly positive. Its `Display` form is the one used in
/// object names: shortest round-trip decimal, `.0` kept for integral values,
/// exponent notation outside `[1e-4, 1e16)` with a signed two-digit exponent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub const DEFAULT: ScaleFactor = ScaleFactor(0.25);

    pub fn new(value: f64) -> Result<Self, ScaleError> {
        if value.is_finite() && value > 0.0 {
            Ok(ScaleFactor(value))
        } else {
            Err(ScaleError::OutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// `floor(dimension * scale)`, truncating the real product.
    ///
    /// Products past `u32::MAX` saturate; callers reject those sizes anyway.
    pub fn apply(self, dimension: u32) -> u32 {
        (f64::from(dimension) * self.0) as u32
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for ScaleFactor {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| ScaleError::Unparseable(s.to_string()))?;
        ScaleFactor::new(value)
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` already gives "1.0" and "0.25"; only the exponent needs a sign
        // and zero padding ("1e-5" -> "1e-05", "1e16" -> "1e+16").
        let repr = format!("{:?}", self.0);
        match repr.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => f.write_str(&repr),
        }
    }
}
