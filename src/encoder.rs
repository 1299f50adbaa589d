//! Fixed-point encoding of reals into the integer plaintext domain.
//!
//! A real $`x`$ is encoded as $`\lfloor x \cdot 2^{30} \rfloor`$. Decoding divides by
//! $`2^{30}`$ and rounds half-up (away from zero on ties) to six decimal places.
//!
//! Every multiplication of two encoded values doubles the scale, so a product of two
//! encodings has to be decoded twice. [`decode_layers`] makes the number of layers explicit.

use crate::error::{Error, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, Signed, ToPrimitive};
use std::fmt::{self, Display};

/// Binary scale of one encoding layer.
pub const SCALE_BITS: u32 = 30;

/// Decimal places kept by [`decode`].
pub const DECIMAL_PLACES: u32 = 6;

/// $`2^{30}`$
pub fn scale() -> BigInt {
    BigInt::from(1u8) << SCALE_BITS
}

fn decimal_unit() -> BigInt {
    BigInt::from(10u32.pow(DECIMAL_PLACES))
}

/// $`\lfloor x \cdot 2^{30} \rfloor`$.
///
/// Scaling by a power of two is exact for every finite `f64` short of overflow, so the floor
/// is taken on the exact product.
pub fn encode(x: f64) -> Result<BigInt> {
    if !x.is_finite() {
        return Err(Error::NonFiniteValue(x));
    }

    let scaled = (x * f64::from(1u32 << SCALE_BITS)).floor();

    BigInt::from_f64(scaled).ok_or(Error::NonFiniteValue(x))
}

/// $`\mathrm{round}(a / d)`$ with ties rounded away from zero, for $`d > 0`$.
fn div_round_half_up(a: &BigInt, d: &BigInt) -> BigInt {
    let two = BigInt::from(2u8);
    let rounded = (a.abs() * &two + d).div_floor(&(d * &two));

    if a.is_negative() {
        -rounded
    } else {
        rounded
    }
}

/// A decimal with six fractional digits, stored exactly as a count of $`10^{-6}`$ units.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixedDecimal {
    units: BigInt,
}

impl FixedDecimal {
    /// Wrap a count of $`10^{-6}`$ units.
    pub fn from_units(units: BigInt) -> Self {
        Self { units }
    }

    /// Count of $`10^{-6}`$ units.
    pub fn units(&self) -> &BigInt {
        &self.units
    }

    /// Decode one more layer: divide by $`2^{30}`$ and round to six decimals.
    pub fn decode(&self) -> Self {
        Self {
            units: div_round_half_up(&self.units, &scale()),
        }
    }

    /// Nearest `f64`. Only for display and comparisons; the decimal itself is exact.
    pub fn to_f64(&self) -> f64 {
        let (int, frac) = self.units.div_rem(&decimal_unit());
        let int = int.to_f64().unwrap_or(f64::NAN);
        let frac = frac.to_f64().unwrap_or(0.0) / f64::from(10u32.pow(DECIMAL_PLACES));

        int + frac
    }
}

impl Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (int, frac) = self.units.abs().div_rem(&decimal_unit());
        let sign = if self.units.is_negative() { "-" } else { "" };

        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            int,
            frac,
            width = DECIMAL_PLACES as usize
        )
    }
}

/// $`v / 2^{30}`$ rounded half-up to six decimal places.
pub fn decode(value: &BigInt) -> FixedDecimal {
    FixedDecimal {
        units: div_round_half_up(&(value * decimal_unit()), &scale()),
    }
}

/// Decode a value carrying `layers` encoding scales, rounding after every layer.
///
/// Zero layers leaves the integer as is.
pub fn decode_layers(value: &BigInt, layers: usize) -> FixedDecimal {
    if layers == 0 {
        return FixedDecimal {
            units: value * decimal_unit(),
        };
    }

    (1..layers).fold(decode(value), |acc, _| acc.decode())
}
