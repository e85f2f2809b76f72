//! Human-readable money figures.

const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

/// Two decimal places, rounding the exact binary value with ties to even.
///
/// Formatting rounds the exact value of the float, so `2.675` (stored just below) becomes
/// `2.67` and the exact tie `1.125` becomes `1.12`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

pub fn round_number_millions(number: f64) -> f64 {
    round2(number / MILLION)
}

pub fn round_number_billions(number: f64) -> f64 {
    round2(number / BILLION)
}

/// `X Billion` from one billion upward, `X Million` below it.
pub fn round_number_as_string(number: f64) -> String {
    if number >= BILLION {
        format!("{} Billion", decimal_text(round_number_billions(number)))
    } else {
        format!("{} Million", decimal_text(round_number_millions(number)))
    }
}

/// Shortest decimal text that keeps at least one fractional digit: `1.0`, `2.5`, `3.14`.
pub fn decimal_text(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
