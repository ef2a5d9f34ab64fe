//! Presentation styles for scene elements
//!
//! A [`Style`] is a small dictionary of CSS presentation attributes
//! (`stroke`, `fill-opacity`, `font-size`, ...). Groups in the scene carry
//! a shared style and elements carry only their delta from it, which keeps
//! output compact. Keys are kept sorted so serialized styles are
//! deterministic.

pub mod color;
pub mod number;
pub mod units;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

pub use color::Color;
pub use number::fmt_num;

/// Keys holding paint values that may carry an alpha channel
pub const PAINT_KEYS: [&str; 2] = ["fill", "stroke"];

/// A dictionary of presentation attributes with sorted keys
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A copy of this style with every key of `overrides` replacing ours
    pub fn merged(&self, overrides: &Style) -> Style {
        let mut out = self.clone();
        for (k, v) in overrides.iter() {
            out.insert(k, v);
        }
        out
    }

    /// A copy of this style with `overrides` applied only to keys we already have
    pub fn updated_from(&self, overrides: &Style) -> Style {
        let mut out = self.clone();
        for (k, v) in overrides.iter() {
            if out.contains_key(k) {
                out.insert(k, v);
            }
        }
        out
    }

    /// A copy of this style without the given keys
    pub fn without(&self, keys: &[&str]) -> Style {
        self.iter()
            .filter(|(k, _)| !keys.contains(k))
            .collect()
    }

    /// Read a length-valued key as pixels
    pub fn px(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(units::to_px)
    }

    /// Canonical `key:value;key:value` form, keys in sorted order
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Parse the `key:value;key:value` form produced by [`Style::to_css`]
    pub fn from_css(css: &str) -> Style {
        css.split(';')
            .filter_map(|decl| {
                let (k, v) = decl.split_once(':')?;
                let (k, v) = (k.trim(), v.trim());
                (!k.is_empty()).then(|| (k.to_string(), v.to_string()))
            })
            .collect()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Style(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Style {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Style values may be written as strings, numbers or booleans in input files
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl<'de> Deserialize<'de> for Style {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, RawValue>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    RawValue::Str(s) => s,
                    RawValue::Num(n) => fmt_num(n),
                    RawValue::Bool(b) => b.to_string(),
                };
                (k, v)
            })
            .collect())
    }
}

/// Split alpha-carrying paint values into an opaque color plus an opacity key
///
/// Many SVG consumers mishandle `rgba()` paints, so `fill` becomes an
/// `rgb(...)` triple and `fill-opacity` receives the alpha (likewise for
/// `stroke`). An alpha written in the color always wins; a color written
/// without alpha keeps an opacity already present in the style, which makes
/// the split idempotent. Unparsable colors pass through unchanged.
pub fn split_rgba_style(style: &Style) -> Style {
    let mut out = style.clone();
    for key in PAINT_KEYS {
        let Some(value) = style.get(key) else {
            continue;
        };
        let opacity_key = format!("{}-opacity", key);
        if value.trim() == "none" {
            out.insert(key, "none");
            out.insert(opacity_key, "1.0");
            continue;
        }
        match Color::parse(value) {
            Some(color) => {
                out.insert(key, color.to_rgb_percent());
                if color.alpha.is_some() || !style.contains_key(&opacity_key) {
                    out.insert(opacity_key, color.opacity_string());
                }
            }
            None => {
                log::warn!("unparsable {} color '{}' passed through verbatim", key, value);
            }
        }
    }
    out
}

/// Whether an element's value for `key` differs meaningfully from the group's
fn differs(key: &str, value: &str, group: Option<&str>) -> bool {
    if key.ends_with("opacity") {
        let group = group.unwrap_or("1");
        return match (value.trim().parse::<f64>(), group.trim().parse::<f64>()) {
            (Ok(a), Ok(b)) => (a - b).abs() > 1e-9,
            _ => value != group,
        };
    }
    let Some(group) = group else {
        return true;
    };
    // element paints arrive split and rounded, so compare at output precision
    if PAINT_KEYS.contains(&key) {
        if let (Some(a), Some(b)) = (Color::parse(value), Color::parse(group)) {
            return a.to_rgb_percent() != b.to_rgb_percent();
        }
    }
    match (units::to_px(value), units::to_px(group)) {
        (Some(a), Some(b)) => (a - b).abs() > 1e-9,
        _ => value != group,
    }
}

/// The minimal override an element needs on top of its group's style
///
/// Paint values are split into opaque color plus opacity first; opacity
/// overrides equal to the group's opacity (or to `1` when the group sets
/// none) are dropped.
pub fn style_delta(element: &Style, group: &Style) -> Style {
    split_rgba_style(element)
        .iter()
        .filter(|(k, v)| differs(k, v, group.get(k)))
        .collect()
}

/// Per-edge style overrides from optional colors and widths
///
/// Returns one (possibly empty) style per edge-table row. A width or color
/// given for a row is always emitted; the opacity split from the color is
/// kept only when it differs from the group's `stroke-opacity`.
pub fn edge_style_deltas(
    nedges: usize,
    colors: &[Option<String>],
    widths: &[Option<f64>],
    group: &Style,
) -> Vec<Style> {
    if colors.iter().all(Option::is_none) && widths.iter().all(Option::is_none) {
        return vec![Style::new(); nedges];
    }
    (0..nedges)
        .map(|idx| {
            let mut style = Style::new();
            if let Some(Some(width)) = widths.get(idx) {
                style.insert("stroke-width", fmt_num(*width));
            }
            if let Some(Some(color)) = colors.get(idx) {
                let split = split_rgba_style(&Style::new().with("stroke", color.as_str()));
                if let Some(stroke) = split.get("stroke") {
                    style.insert("stroke", stroke);
                }
                if let Some(opacity) = split.get("stroke-opacity") {
                    if differs("stroke-opacity", opacity, group.get("stroke-opacity")) {
                        style.insert("stroke-opacity", opacity);
                    }
                }
            }
            style
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edge_group() -> Style {
        Style::from([
            ("stroke", "#262626"),
            ("stroke-opacity", "1"),
            ("stroke-width", "2"),
        ])
    }

    #[test]
    fn test_to_css_sorted() {
        let style = Style::from([("stroke", "red"), ("fill", "none"), ("font-size", "9px")]);
        assert_eq!(style.to_css(), "fill:none;font-size:9px;stroke:red");
    }

    #[test]
    fn test_from_css_roundtrip() {
        let css = "fill:none;stroke:rgb(50%,0%,0%);stroke-width:2";
        assert_eq!(Style::from_css(css).to_css(), css);
        assert!(Style::from_css("").is_empty());
    }

    #[test]
    fn test_split_rgba_fill() {
        let style = Style::from([("fill", "rgba(50%,50%,50%,0.5)")]);
        let split = split_rgba_style(&style);
        assert_eq!(split.get("fill"), Some("rgb(50%,50%,50%)"));
        assert_eq!(split.get("fill-opacity"), Some("0.5"));
    }

    #[test]
    fn test_split_rgba_idempotent() {
        let style = Style::from([("fill", "rgba(50%,50%,50%,0.5)")]);
        let once = split_rgba_style(&style);
        let twice = split_rgba_style(&Style::from_css(&once.to_css()));
        assert_eq!(once.to_css(), twice.to_css());
    }

    #[test]
    fn test_split_none_and_raw() {
        let split = split_rgba_style(&Style::from([("stroke", "none")]));
        assert_eq!(split.get("stroke-opacity"), Some("1.0"));

        let raw = Style::from([("fill", "url(#gradient)")]);
        assert_eq!(split_rgba_style(&raw), raw);
    }

    #[test]
    fn test_split_leaves_input_untouched() {
        let style = Style::from([("fill", "red")]);
        let _ = split_rgba_style(&style);
        assert_eq!(style, Style::from([("fill", "red")]));
    }

    #[test]
    fn test_delta_equal_to_group_is_empty() {
        let group = edge_group();
        assert!(style_delta(&group, &group).is_empty());
    }

    #[test]
    fn test_delta_color_only() {
        let group = edge_group();
        let delta = style_delta(&Style::from([("stroke", "red")]), &group);
        assert_eq!(delta, Style::from([("stroke", "rgb(100%,0%,0%)")]));

        let delta = style_delta(&Style::from([("stroke", "rgba(100%,0%,0%,0.25)")]), &group);
        assert_eq!(
            delta,
            Style::from([("stroke", "rgb(100%,0%,0%)"), ("stroke-opacity", "0.25")])
        );
    }

    #[test]
    fn test_edge_style_deltas() {
        let group = edge_group();
        let deltas = edge_style_deltas(
            3,
            &[None, Some("blue".to_string()), None],
            &[None, None, Some(4.0)],
            &group,
        );
        assert_eq!(deltas.len(), 3);
        assert!(deltas[0].is_empty());
        assert_eq!(deltas[1].to_css(), "stroke:rgb(0%,0%,100%)");
        assert_eq!(deltas[2].to_css(), "stroke-width:4");
    }

    #[test]
    fn test_delta_default_edge_style_is_empty() {
        let group = crate::mark::default_edge_style();
        assert!(style_delta(&group, &group).is_empty());
        let delta = style_delta(&Style::from([("stroke", "rgb(14.9%,14.9%,14.9%)")]), &group);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_edge_style_deltas_keep_values_equal_to_group() {
        let group = crate::mark::default_edge_style();
        let deltas = edge_style_deltas(
            3,
            &[None, Some("#262626".to_string()), Some("rgba(0,0,255,0.5)".to_string())],
            &[Some(2.0), None, None],
            &group,
        );
        assert_eq!(deltas[0].to_css(), "stroke-width:2");
        assert_eq!(deltas[1].to_css(), "stroke:rgb(14.9%,14.9%,14.9%)");
        assert_eq!(
            deltas[2].to_css(),
            "stroke:rgb(0%,0%,100%);stroke-opacity:0.5"
        );
    }

    #[test]
    fn test_edge_style_deltas_unstyled() {
        let deltas = edge_style_deltas(2, &[], &[], &edge_group());
        assert_eq!(deltas, vec![Style::new(), Style::new()]);
    }

    #[test]
    fn test_without_and_merged() {
        let style = Style::from([("text-anchor", "middle"), ("fill", "red")]);
        assert_eq!(style.without(&["text-anchor"]).to_css(), "fill:red");
        let merged = style.merged(&Style::from([("fill", "blue")]));
        assert_eq!(merged.get("fill"), Some("blue"));
        let updated = style.updated_from(&Style::from([("fill", "blue"), ("stroke", "red")]));
        assert!(!updated.contains_key("stroke"));
    }
}
