use crate::types::MeasurementResult;
use std::fmt;

/// Plain-text measurement report written to `.txt` outputs
///
/// Exactly two lines, no trailing newline:
///
/// ```text
/// 1000 voxels
/// 1000.0 mm^3
/// ```
pub struct TextReport<'a> {
    result: &'a MeasurementResult,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(result: &'a MeasurementResult) -> Self {
        Self { result }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} voxels", self.result.voxel_count)?;
        write!(
            f,
            "{} {}^3",
            format_round_trip(self.result.physical_volume),
            self.result.units
        )
    }
}

/// Caption drawn in the last quadrant of a preview figure
pub struct FigureCaption<'a> {
    result: &'a MeasurementResult,
}

impl<'a> FigureCaption<'a> {
    /// Creates a new figure caption
    pub fn new(result: &'a MeasurementResult) -> Self {
        Self { result }
    }
}

impl<'a> fmt::Display for FigureCaption<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total volume = ")?;
        writeln!(f, "{} voxels", group_thousands(self.result.voxel_count))?;
        write!(
            f,
            "{} {}\u{00B3}",
            format_grouped_f1(self.result.physical_volume),
            self.result.units
        )
    }
}

/// Formats the shortest decimal that reads back as the same `f64`
///
/// Magnitudes in `[1e-4, 1e16)` (and zero) are written positionally with at
/// least one fractional digit; the rest use an exponent that carries a sign
/// and at least two digits.
///
/// # Example
///
/// ```
/// use volpreview_core::cli::report::format_round_trip;
///
/// assert_eq!(format_round_trip(1000.0), "1000.0");
/// assert_eq!(format_round_trip(1e16), "1e+16");
/// assert_eq!(format_round_trip(1.5e-5), "1.5e-05");
/// ```
pub fn format_round_trip(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        // LowerExp without a precision is already the shortest mantissa.
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => match exponent.parse::<i32>() {
                Ok(exp) => format!(
                    "{}e{}{:02}",
                    mantissa,
                    if exp < 0 { '-' } else { '+' },
                    exp.abs()
                ),
                Err(_) => formatted.clone(),
            },
            None => formatted.clone(),
        };
    }

    let formatted = value.to_string();
    if formatted.contains('.') {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}

/// Formats an integer with `,` between groups of three digits
pub fn group_thousands(value: u64) -> String {
    insert_separators(&value.to_string())
}

/// Formats with one decimal place and `,` thousands separators
///
/// Non-finite values are formatted as-is.
pub fn format_grouped_f1(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    if !value.is_finite() {
        return formatted;
    }

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "0"));
    format!("{}{}.{}", sign, insert_separators(int_part), frac_part)
}

fn insert_separators(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
