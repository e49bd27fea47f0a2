//! Declared conversions from assessor-native scales onto the shared 0-100 scale.
//!
//! Every assessor states which [`RawScore`] shape (or which [`CategoricalScale`]
//! table) it produces, so the conversion is deterministic and auditable.

use super::super::domain::clamp_score;

/// Raw numeric outputs produced by assessors before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawScore {
    /// Already on 0-100.
    Percent(f64),
    /// 0-10 rating, multiplied by 10.
    TenPoint(f64),
    /// 0-5 rating, multiplied by 20.
    FivePoint(f64),
    /// 0-1 probability or fraction, multiplied by 100.
    Fraction(f64),
    /// `value / max`, e.g. a GPA on a 4.0 scale. A non-positive `max` yields zero.
    Ratio { value: f64, max: f64 },
}

impl RawScore {
    pub fn normalize(self) -> f64 {
        let scaled = match self {
            RawScore::Percent(value) => value,
            RawScore::TenPoint(value) => value * 10.0,
            RawScore::FivePoint(value) => value * 20.0,
            RawScore::Fraction(value) => value * 100.0,
            RawScore::Ratio { value, max } => {
                if max > 0.0 && max.is_finite() {
                    value / max * 100.0
                } else {
                    0.0
                }
            }
        };
        clamp_score(scaled)
    }
}

/// Qualitative outputs carry a fixed lookup table onto 0-100.
pub trait CategoricalScale {
    fn normalized(&self) -> f64;
}

/// Scale names accepted in score sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Percent,
    TenPoint,
    FivePoint,
    Fraction,
}

impl ScaleKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "percent" | "pct" | "0-100" => Some(ScaleKind::Percent),
            "ten_point" | "0-10" | "ten" => Some(ScaleKind::TenPoint),
            "five_point" | "0-5" | "five" => Some(ScaleKind::FivePoint),
            "fraction" | "probability" | "0-1" => Some(ScaleKind::Fraction),
            _ => None,
        }
    }

    pub fn raw(self, value: f64) -> RawScore {
        match self {
            ScaleKind::Percent => RawScore::Percent(value),
            ScaleKind::TenPoint => RawScore::TenPoint(value),
            ScaleKind::FivePoint => RawScore::FivePoint(value),
            ScaleKind::Fraction => RawScore::Fraction(value),
        }
    }
}

/// Mean of already-normalized values; `None` for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}
