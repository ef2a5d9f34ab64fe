//! Number formatting shared by style values and color strings

/// Format a number the shortest way that round-trips, without a trailing `.0`
///
/// `2.0` becomes `"2"`, `0.6` stays `"0.6"`.
pub fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Format with three significant digits, trailing zeros stripped
///
/// Mirrors the `%.3g` convention used for percentage color channels:
/// `90.588` becomes `"90.6"`, `50.0` becomes `"50"`, `5.882` becomes `"5.88"`.
pub fn fmt_sig3(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return if value.is_nan() { "nan".to_string() } else { fmt_num(value) };
    }
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (2 - exponent).max(0) as usize;
    let s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Format a float keeping at least one decimal digit (`1.0`, `0.5`)
pub fn fmt_float(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
