//! Cell decoding: opaque bytes → typed number.
//!
//! Cells in the quake table were written by more than one job, so the same
//! column may hold a fixed-width big-endian number in one row and a textual
//! literal in the next. Decoding walks an ordered list of [`Strategy`]s and
//! takes the first one that produces a value. Nothing here fails: when no
//! strategy applies the caller gets the kind's zero value.
//!
//! The low-level entry point is [`interpret`], which reports *how* a value
//! was obtained as a [`Decoded`]. [`decode`] collapses that to a plain value.

use std::str::FromStr;

use crate::field::{FieldKind, ScalarValue};

// ═══════════════════════════════════════════════════════════════
//  Strategies
// ═══════════════════════════════════════════════════════════════

/// One way of reading a cell, tried in the order given by
/// [`Numeric::STRATEGIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Length equals the kind's width: reinterpret as big-endian binary.
    /// Authoritative, no plausibility check.
    FixedWidth,
    /// Trimmed UTF-8 text parsed as a literal of the target kind.
    Literal,
    /// Trimmed UTF-8 text parsed as `f64`, truncated toward zero.
    /// Integer kinds only.
    TruncatedFloat,
}

impl Strategy {
    /// Try this strategy alone. `None` means "does not apply", the next
    /// strategy gets a turn.
    pub fn attempt<T: Numeric>(self, bytes: &[u8]) -> Option<T> {
        match self {
            Strategy::FixedWidth => T::from_be_slice(bytes),
            Strategy::Literal => trimmed_text(bytes)?.parse().ok(),
            Strategy::TruncatedFloat => T::truncate(trimmed_text(bytes)?.parse().ok()?),
        }
    }

    fn wrap<T>(self, value: T) -> Decoded<T> {
        match self {
            Strategy::FixedWidth => Decoded::Binary(value),
            Strategy::Literal => Decoded::Literal(value),
            Strategy::TruncatedFloat => Decoded::TruncatedFloat(value),
        }
    }
}

/// Strip ASCII control characters and spaces (everything up to U+0020) from
/// both ends. NUL padding goes; non-ASCII whitespace such as U+00A0 stays.
fn trim_padding(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

/// Non-blank trimmed text, or `None` for non-UTF-8 and blank input.
fn trimmed_text(bytes: &[u8]) -> Option<&str> {
    let text = trim_padding(std::str::from_utf8(bytes).ok()?);
    (!text.is_empty()).then_some(text)
}

fn is_blank(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok_and(|s| trim_padding(s).is_empty())
}

// ═══════════════════════════════════════════════════════════════
//  Target kinds
// ═══════════════════════════════════════════════════════════════

/// A number type a cell can be decoded into.
pub trait Numeric: Copy + PartialEq + std::fmt::Debug + FromStr {
    const KIND: FieldKind;
    const ZERO: Self;
    /// Interpretation order. First success wins.
    const STRATEGIES: &'static [Strategy];

    /// Big-endian reinterpretation; `None` unless `bytes.len()` is exactly
    /// the kind's width.
    fn from_be_slice(bytes: &[u8]) -> Option<Self>;

    /// Truncate a parsed float toward zero. Out-of-range values saturate
    /// and NaN becomes zero.
    fn truncate(value: f64) -> Option<Self>;
}

const INTEGER_STRATEGIES: &[Strategy] =
    &[Strategy::FixedWidth, Strategy::Literal, Strategy::TruncatedFloat];
const FLOAT_STRATEGIES: &[Strategy] = &[Strategy::FixedWidth, Strategy::Literal];

impl Numeric for i32 {
    const KIND: FieldKind = FieldKind::Int32;
    const ZERO: Self = 0;
    const STRATEGIES: &'static [Strategy] = INTEGER_STRATEGIES;

    fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 4]>::try_from(bytes).ok().map(i32::from_be_bytes)
    }

    fn truncate(value: f64) -> Option<Self> {
        Some(value as i32)
    }
}

impl Numeric for i64 {
    const KIND: FieldKind = FieldKind::Int64;
    const ZERO: Self = 0;
    const STRATEGIES: &'static [Strategy] = INTEGER_STRATEGIES;

    fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 8]>::try_from(bytes).ok().map(i64::from_be_bytes)
    }

    fn truncate(value: f64) -> Option<Self> {
        Some(value as i64)
    }
}

impl Numeric for f64 {
    const KIND: FieldKind = FieldKind::Float64;
    const ZERO: Self = 0.0;
    const STRATEGIES: &'static [Strategy] = FLOAT_STRATEGIES;

    fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 8]>::try_from(bytes).ok().map(f64::from_be_bytes)
    }

    // Floats never go through truncation.
    fn truncate(_value: f64) -> Option<Self> {
        None
    }
}

// ═══════════════════════════════════════════════════════════════
//  Outcome
// ═══════════════════════════════════════════════════════════════

/// How a cell was read. Keeps "parsed a real zero" apart from
/// "fell back to zero", which [`decode`] deliberately forgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded<T> {
    /// No cell stored under the column.
    Absent,
    Binary(T),
    Literal(T),
    TruncatedFloat(T),
    /// Empty or whitespace-only text.
    Blank,
    /// Not binary of the right width, not a number as text.
    Uninterpretable,
}

impl<T: Numeric> Decoded<T> {
    /// Collapse to a value, substituting zero for every non-value outcome.
    pub fn value(self) -> T {
        match self {
            Decoded::Binary(v) | Decoded::Literal(v) | Decoded::TruncatedFloat(v) => v,
            Decoded::Absent | Decoded::Blank | Decoded::Uninterpretable => T::ZERO,
        }
    }

    /// Strategy that produced the value, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            Decoded::Binary(_) => Some(Strategy::FixedWidth),
            Decoded::Literal(_) => Some(Strategy::Literal),
            Decoded::TruncatedFloat(_) => Some(Strategy::TruncatedFloat),
            _ => None,
        }
    }

    /// A cell was stored but nothing could be read out of it.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Decoded::Blank | Decoded::Uninterpretable)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Entry points
// ═══════════════════════════════════════════════════════════════

/// Run the strategy chain for `T` over an optional cell.
pub fn interpret<T: Numeric>(raw: Option<&[u8]>) -> Decoded<T> {
    let Some(bytes) = raw else {
        return Decoded::Absent;
    };
    if bytes.len() != T::KIND.width() && is_blank(bytes) {
        return Decoded::Blank;
    }
    T::STRATEGIES
        .iter()
        .find_map(|strategy| strategy.attempt::<T>(bytes).map(|v| strategy.wrap(v)))
        .unwrap_or(Decoded::Uninterpretable)
}

/// Best-effort decode; zero when nothing applies.
pub fn decode<T: Numeric>(raw: Option<&[u8]>) -> T {
    interpret::<T>(raw).value()
}

pub fn decode_i32(raw: Option<&[u8]>) -> i32 {
    decode(raw)
}

pub fn decode_i64(raw: Option<&[u8]>) -> i64 {
    decode(raw)
}

pub fn decode_f64(raw: Option<&[u8]>) -> f64 {
    decode(raw)
}

/// Decode into whatever `kind` names.
pub fn decode_scalar(kind: FieldKind, raw: Option<&[u8]>) -> ScalarValue {
    match kind {
        FieldKind::Int32 => ScalarValue::Int32(decode(raw)),
        FieldKind::Int64 => ScalarValue::Int64(decode(raw)),
        FieldKind::Float64 => ScalarValue::Float64(decode(raw)),
    }
}

/// Whether the cell (if present) ended up as a fallback zero for `kind`.
pub fn is_degraded(kind: FieldKind, raw: Option<&[u8]>) -> bool {
    match kind {
        FieldKind::Int32 => interpret::<i32>(raw).is_degraded(),
        FieldKind::Int64 => interpret::<i64>(raw).is_degraded(),
        FieldKind::Float64 => interpret::<f64>(raw).is_degraded(),
    }
}
