use serde::{Deserialize, Serialize};

use super::types::{round_half_up, IntakeEntry, MacroGrams};

/// A gram amount as submitted by a form: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GramsInput {
    Number(f64),
    Text(String),
}

impl GramsInput {
    /// Reads the whole value as a number; `"12g"` is not a number.
    pub fn strict(&self) -> Option<f64> {
        let value = match self {
            GramsInput::Number(n) => *n,
            GramsInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Reads the leading number of the value; `"12g"` is 12.
    pub fn lenient(&self) -> Option<f64> {
        match self {
            GramsInput::Number(n) => n.is_finite().then_some(*n),
            GramsInput::Text(s) => leading_number(s.trim()),
        }
    }
}

fn digits_at(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// Longest numeric prefix: optional sign, digits with an optional fraction,
/// then an optional exponent that is only taken when it has digits.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = digits_at(bytes, end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_at(bytes, end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_digits = digits_at(bytes, exp_start);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Non-negative grams from an optional form value; blank, unparseable and
/// negative inputs all count as zero.
pub fn grams_or_zero(input: Option<&GramsInput>) -> f64 {
    input
        .and_then(GramsInput::lenient)
        .filter(|g| *g > 0.0)
        .unwrap_or(0.0)
}

impl IntakeEntry {
    pub fn from_inputs(
        protein: Option<&GramsInput>,
        carbs: Option<&GramsInput>,
        fat: Option<&GramsInput>,
    ) -> Self {
        Self {
            protein: grams_or_zero(protein),
            carbs: grams_or_zero(carbs),
            fat: grams_or_zero(fat),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Scales per-100g macros to a serving, one decimal per field. Returns zeros
/// when the serving is missing, not a number, or not positive.
pub fn scale_by_serving_size(base_per_100g: &MacroGrams, serving: Option<&GramsInput>) -> MacroGrams {
    let Some(grams) = serving.and_then(GramsInput::strict).filter(|g| *g > 0.0) else {
        return MacroGrams::default();
    };
    let factor = grams / 100.0;
    MacroGrams {
        protein: round_one_decimal(base_per_100g.protein * factor),
        carbs: round_one_decimal(base_per_100g.carbs * factor),
        fat: round_one_decimal(base_per_100g.fat * factor),
    }
}
