//! CSS length conversion to pixels

/// Pixels per unit at 96 dpi
const PX_PER_IN: f64 = 96.0;
const PX_PER_PT: f64 = PX_PER_IN / 72.0;
const PX_PER_CM: f64 = PX_PER_IN / 2.54;
const PX_PER_MM: f64 = PX_PER_CM / 10.0;

/// Font size used to resolve `em` lengths
pub const DEFAULT_EM_PX: f64 = 16.0;

/// Convert a CSS length such as `15px`, `9pt` or `-2` into pixels
///
/// Unitless values are treated as pixels. Returns `None` for unknown units
/// or unparsable numbers.
pub fn to_px(length: &str) -> Option<f64> {
    let length = length.trim();
    let split = length
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .unwrap_or(length.len());
    let (number, unit) = length.split_at(split);
    let value: f64 = number.trim().parse().ok()?;

    let scale = match unit.trim() {
        "" | "px" => 1.0,
        "pt" => PX_PER_PT,
        "in" => PX_PER_IN,
        "cm" => PX_PER_CM,
        "mm" => PX_PER_MM,
        "em" => DEFAULT_EM_PX,
        _ => return None,
    };
    Some(value * scale)
}
