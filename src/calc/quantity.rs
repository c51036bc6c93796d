//! Kubernetes resource quantities.
//!
//! A [`Quantity`] keeps its value in thousandths of the base unit (millicores
//! for CPU, millibytes for memory), which is the finest resolution any
//! calculation here needs. Parsing follows the Kubernetes quantity grammar:
//! decimal SI suffixes (`m`, `k`, `M`, `G`, ...), binary suffixes (`Ki`,
//! `Mi`, `Gi`, ...) and decimal exponents (`1e3`).
//!
//! Scaling by a real factor rounds the product half away from zero. Chaining
//! such a scale with further additions accumulates that rounding, which is
//! acceptable for sizing a quota but not for exact billing.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

// ============================================================================
// Parsing
// ============================================================================

/// Regex for quantity strings (e.g. "100m", "1.5", "128Mi", "1e3", "-2Gi").
static QUANTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([+-]?)(\d*)(?:\.(\d*))?(?:(Ki|Mi|Gi|Ti|Pi|Ei|n|u|m|k|M|G|T|P|E)|[eE]([+-]?\d+))?$",
    )
    .unwrap()
});

const MILLI_PER_UNIT: i128 = 1000;

const BINARY_SUFFIXES: [&str; 7] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const DECIMAL_SUFFIXES: [&str; 8] = ["m", "", "k", "M", "G", "T", "P", "E"];
const EXPONENT_SUFFIXES: [&str; 8] = ["e-3", "", "e3", "e6", "e9", "e12", "e15", "e18"];

/// Error returned when a quantity string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseQuantityError {
    #[error("{0:?} is not a valid quantity")]
    Invalid(String),

    #[error("quantity {0:?} is out of range")]
    OutOfRange(String),
}

/// How a quantity was written, which decides how it is rendered again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Format {
    /// Power-of-ten suffixes: `m`, `k`, `M`, `G`, ...
    #[default]
    DecimalSI,
    /// Power-of-two suffixes: `Ki`, `Mi`, `Gi`, ...
    BinarySI,
    /// Scientific notation: `1e3`, `5e-3`.
    DecimalExponent,
}

/// Multiplier a suffix applies to the written number.
enum Base {
    /// `10^n`
    Decimal(i64),
    /// `2^n`
    Binary(u32),
}

fn suffix_base(suffix: &str) -> (Base, Format) {
    match suffix {
        "n" => (Base::Decimal(-9), Format::DecimalSI),
        "u" => (Base::Decimal(-6), Format::DecimalSI),
        "m" => (Base::Decimal(-3), Format::DecimalSI),
        "k" => (Base::Decimal(3), Format::DecimalSI),
        "M" => (Base::Decimal(6), Format::DecimalSI),
        "G" => (Base::Decimal(9), Format::DecimalSI),
        "T" => (Base::Decimal(12), Format::DecimalSI),
        "P" => (Base::Decimal(15), Format::DecimalSI),
        "E" => (Base::Decimal(18), Format::DecimalSI),
        "Ki" => (Base::Binary(10), Format::BinarySI),
        "Mi" => (Base::Binary(20), Format::BinarySI),
        "Gi" => (Base::Binary(30), Format::BinarySI),
        "Ti" => (Base::Binary(40), Format::BinarySI),
        "Pi" => (Base::Binary(50), Format::BinarySI),
        "Ei" => (Base::Binary(60), Format::BinarySI),
        _ => (Base::Decimal(0), Format::DecimalSI),
    }
}

/// Division of a non-negative value that rounds any remainder up.
fn div_ceil(value: i128, divisor: i128) -> i128 {
    value / divisor + i128::from(value % divisor != 0)
}

/// `value * 10^exponent` in milli units; sub-milli remainders round up.
fn scale_pow10(value: i128, exponent: i64) -> Option<i128> {
    if value == 0 {
        return Some(0);
    }
    let magnitude = u32::try_from(exponent.unsigned_abs()).ok()?;
    if exponent >= 0 {
        value.checked_mul(10i128.checked_pow(magnitude)?)
    } else {
        match 10i128.checked_pow(magnitude) {
            Some(divisor) => Some(div_ceil(value, divisor)),
            // Far below a milli unit, which still rounds up to one.
            None => Some(1),
        }
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// A CPU or memory amount with milli-unit resolution.
///
/// Equality and ordering compare values only; `1Gi` equals `1073741824`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantity {
    milli: i128,
    format: Format,
}

impl Quantity {
    /// A zero quantity that renders in the given format once non-zero values are added.
    pub const fn zero(format: Format) -> Self {
        Self { milli: 0, format }
    }

    /// Build a quantity from a value in thousandths of a unit.
    pub const fn from_milli(milli: i128, format: Format) -> Self {
        Self { milli, format }
    }

    /// The value in thousandths of a unit.
    pub fn milli_value(&self) -> i128 {
        self.milli
    }

    /// The value in whole units, rounded up.
    pub fn value(&self) -> i128 {
        if self.milli >= 0 {
            div_ceil(self.milli, MILLI_PER_UNIT)
        } else {
            self.milli / MILLI_PER_UNIT
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn is_zero(&self) -> bool {
        self.milli == 0
    }

    /// Multiply by a real factor, rounding half away from zero to a milli unit.
    ///
    /// Integral factors are applied exactly.
    pub fn scale(self, factor: f64) -> Self {
        self.scale_with_resolution(factor, 1)
    }

    /// Multiply by a real factor, rounding half away from zero to a whole unit.
    ///
    /// Memory has no meaningful resolution below a byte, so memory quantities
    /// are scaled with this. Integral factors are applied exactly.
    pub fn scale_to_units(self, factor: f64) -> Self {
        self.scale_with_resolution(factor, MILLI_PER_UNIT)
    }

    /// Multiply by an integer. Exact.
    pub fn scale_int(self, factor: i32) -> Self {
        Self {
            milli: self.milli.saturating_mul(i128::from(factor)),
            format: self.format,
        }
    }

    fn scale_with_resolution(self, factor: f64, resolution: i128) -> Self {
        if factor.fract() == 0.0 && factor.abs() <= f64::from(i32::MAX) {
            return self.scale_int(factor as i32);
        }

        let product = self.milli as f64 * factor / resolution as f64;
        Self {
            milli: (product.round() as i128).saturating_mul(resolution),
            format: self.format,
        }
    }

    /// Format of the result of combining `self` with `other`.
    ///
    /// A zero quantity has no meaningful format of its own, so it adopts the
    /// format of whatever is added to it.
    fn combined_format(&self, other: &Self) -> Format {
        if self.milli == 0 {
            other.format
        } else {
            self.format
        }
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            milli: self.milli.saturating_add(rhs.milli),
            format: self.combined_format(&rhs),
        }
    }
}

/// `higher - lower`. A `lower` larger than `higher` yields a negative quantity.
impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            milli: self.milli.saturating_sub(rhs.milli),
            format: self.combined_format(&rhs),
        }
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.milli == other.milli
    }
}

impl Eq for Quantity {}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.milli.cmp(&other.milli)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = || ParseQuantityError::Invalid(s.to_string());
        let out_of_range = || ParseQuantityError::OutOfRange(s.to_string());

        let caps = QUANTITY_REGEX.captures(input).ok_or_else(invalid)?;
        let whole = caps.get(2).map_or("", |m| m.as_str());
        let fraction = caps.get(3).map_or("", |m| m.as_str());
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");

        let (base, format) = match (caps.get(4), caps.get(5)) {
            (Some(suffix), _) => suffix_base(suffix.as_str()),
            (None, Some(exponent)) => {
                let exponent: i64 = exponent.as_str().parse().map_err(|_| out_of_range())?;
                (Base::Decimal(exponent), Format::DecimalExponent)
            }
            (None, None) => (Base::Decimal(0), Format::DecimalSI),
        };

        let digits = format!("{whole}{fraction}");
        let digits = digits.trim_start_matches('0');
        let mantissa: i128 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| out_of_range())?
        };
        let fraction_digits = fraction.len() as i64;

        let milli = match base {
            Base::Decimal(exponent) => scale_pow10(mantissa, exponent + 3 - fraction_digits),
            Base::Binary(shift) => mantissa
                .checked_mul(MILLI_PER_UNIT)
                .and_then(|v| v.checked_mul(1i128 << shift))
                .and_then(|v| {
                    let divisor = 10i128.checked_pow(u32::try_from(fraction_digits).ok()?)?;
                    Some(div_ceil(v, divisor))
                }),
        }
        .ok_or_else(out_of_range)?;

        Ok(Self {
            milli: if negative { -milli } else { milli },
            format,
        })
    }
}

/// Renders the canonical Kubernetes form: the largest suffix that keeps the
/// number whole, e.g. `2750m`, `11`, `22Gi`, `8592Mi`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milli == 0 {
            return f.write_str("0");
        }

        let sign = if self.milli < 0 { "-" } else { "" };
        let magnitude = self.milli.unsigned_abs();
        let unit = MILLI_PER_UNIT as u128;

        // Binary suffixes only make sense for whole values of at least 1Ki.
        if self.format == Format::BinarySI && magnitude % unit == 0 && magnitude >= 1024 * unit {
            let mut value = magnitude / unit;
            let mut exponent = 0;
            while exponent < BINARY_SUFFIXES.len() - 1 && value % 1024 == 0 {
                value /= 1024;
                exponent += 1;
            }
            return write!(f, "{sign}{value}{}", BINARY_SUFFIXES[exponent]);
        }

        let mut value = magnitude;
        let mut exponent = 0;
        while exponent < DECIMAL_SUFFIXES.len() - 1 && value % 1000 == 0 {
            value /= 1000;
            exponent += 1;
        }
        let suffix = match self.format {
            Format::DecimalExponent => EXPONENT_SUFFIXES[exponent],
            _ => DECIMAL_SUFFIXES[exponent],
        };
        write!(f, "{sign}{value}{suffix}")
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
