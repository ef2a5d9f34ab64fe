//! Node label and tip label passes
//!
//! Group elements carry only non-positional text style. Anchoring and
//! offsets are resolved here through the text layout and baked into each
//! label's transform and coordinates.

use std::fmt;

use crate::geometry::Projection;
use crate::mark::{Layout, TreeMark};
use crate::scene::{Element, SceneGroup};
use crate::style::{fmt_num, style_delta, Style};

use super::config::SceneConfig;
use super::text::{layout_text, FontMetrics};

/// Style keys that position text rather than paint it
pub const POSITIONAL_KEYS: [&str; 3] = ["baseline-shift", "-toyplot-anchor-shift", "text-anchor"];

/// Default anchor offset of tip labels, in pixels
pub const DEFAULT_TIP_OFFSET: f64 = 15.0;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anchor, signed offset and rotation of one tip label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipPlacement {
    pub anchor: TextAnchor,
    pub anchor_shift: f64,
    pub angle: f64,
}

/// Place a tip label for a layout
///
/// Radial labels on the far side of the circle (strictly between -90 and
/// -270 degrees) are flipped upright: rotated by 180 and anchored at their
/// end.
pub fn tip_label_placement(layout: Layout, angle: f64, offset: f64) -> TipPlacement {
    let (anchor, anchor_shift, angle) = match layout {
        Layout::Right | Layout::Up => (TextAnchor::Start, offset, angle),
        Layout::Left | Layout::Down => (TextAnchor::End, -offset, angle),
        Layout::Radial if angle < -90.0 && angle > -270.0 => {
            (TextAnchor::End, -offset, angle + 180.0)
        }
        Layout::Radial => (TextAnchor::Start, offset, angle),
    };
    TipPlacement {
        anchor,
        anchor_shift,
        angle,
    }
}

/// Text style shared by every tip label
pub fn default_tip_group_style() -> Style {
    Style::from([
        ("fill", "rgb(90.6%,54.1%,76.5%)"),
        ("fill-opacity", "1.0"),
        ("font-family", "helvetica"),
        ("font-size", "9px"),
        ("font-weight", "normal"),
        ("stroke", "none"),
        ("white-space", "pre"),
    ])
}

/// Style used to measure and anchor each tip label
pub fn default_tip_position_style() -> Style {
    Style::from([
        ("-toyplot-anchor-shift", "15px"),
        ("baseline-shift", "0px"),
        ("font-family", "helvetica"),
        ("font-size", "11px"),
        ("text-anchor", "start"),
    ])
}

/// Labels the node-label pass leaves undrawn
pub(crate) fn is_blank(label: &str) -> bool {
    label.is_empty() || label == " "
}

/// Fill override for one label, relative to its group
fn color_delta(color: Option<&str>, group: &Style) -> Style {
    color
        .map(|fill| style_delta(&Style::new().with("fill", fill), group))
        .unwrap_or_default()
}

/// Node label pass; `None` when no node has a label
pub fn mark_node_labels(
    mark: &TreeMark,
    proj: &Projection,
    scene: &SceneConfig,
    fonts: &dyn FontMetrics,
) -> Option<Element> {
    let labeled: Vec<(usize, &str)> = (0..mark.nnodes())
        .filter_map(|idx| mark.node_label(idx).map(|l| (idx, l)))
        .filter(|(_, l)| !is_blank(l))
        .collect();
    if labeled.is_empty() {
        log::debug!("node labels skipped: no labels");
        return None;
    }

    let style_pos = Style::from([("stroke", "none"), ("text-anchor", "middle")])
        .merged(&mark.node_labels_style);
    let group_style = style_pos.without(&POSITIONAL_KEYS);
    let mut group = Element::group()
        .with_attr("class", SceneGroup::NodeLabels.class(&scene.class_prefix))
        .with_style(&group_style);

    for &(idx, label) in &labeled {
        let p = proj.node(idx);
        let delta = color_delta(mark.node_label_color(idx), &group_style);
        for text_box in layout_text(label, &style_pos, fonts) {
            let mut el = Element::group().with_attr(
                "transform",
                format!(
                    "translate({:.2},{:.2})",
                    p.x + text_box.left,
                    p.y + text_box.baseline
                ),
            );
            if let Some(hover) = mark.node_hover(idx) {
                el.push(Element::new("title").with_text(hover));
            }
            el.push(Element::new("text").with_style(&delta).with_text(text_box.text));
            group.push(el);
        }
    }

    log::debug!("node labels: {}", labeled.len());
    Some(group)
}

/// Tip label pass; `None` when no tip has a label
pub fn mark_tip_labels(
    mark: &TreeMark,
    proj: &Projection,
    scene: &SceneConfig,
    fonts: &dyn FontMetrics,
) -> Option<Element> {
    if mark.tip_labels.iter().all(Option::is_none) {
        log::debug!("tip labels skipped: no labels");
        return None;
    }

    let group_style = default_tip_group_style().updated_from(&mark.tip_labels_style);
    let pos_style = default_tip_position_style().updated_from(&mark.tip_labels_style);
    let offset = pos_style
        .px("-toyplot-anchor-shift")
        .unwrap_or(DEFAULT_TIP_OFFSET);

    let mut group = Element::group()
        .with_attr("class", SceneGroup::TipLabels.class(&scene.class_prefix))
        .with_style(&group_style);

    let mut count = 0;
    for (tidx, label) in mark.tip_labels.iter().enumerate() {
        let Some(label) = label.as_deref() else {
            continue;
        };
        let placement = tip_label_placement(mark.layout, mark.tip_angle(tidx), offset);
        let style = pos_style
            .clone()
            .with("text-anchor", placement.anchor.as_str())
            .with(
                "-toyplot-anchor-shift",
                format!("{}px", fmt_num(placement.anchor_shift)),
            );

        let p = proj.tip_position(tidx);
        let mut tip = Element::group().with_attr(
            "transform",
            format!(
                "translate({:.2},{:.2})rotate({:.0})",
                p.x, p.y, placement.angle
            ),
        );

        let delta = color_delta(mark.tip_color(tidx), &group_style);
        for text_box in layout_text(label, &style, fonts) {
            tip.push(
                Element::new("text")
                    .with_attr("x", format!("{:.2}", text_box.left))
                    .with_attr("y", format!("{:.2}", text_box.baseline))
                    .with_style(&delta)
                    .with_text(text_box.text),
            );
        }
        group.push(tip);
        count += 1;
    }

    log::debug!("tip labels: {} ({} layout)", count, mark.layout);
    Some(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::render::text::HelveticaMetrics;
    use pretty_assertions::assert_eq;

    fn fixture() -> (TreeMark, Projection) {
        let mark = TreeMark::new(
            vec![Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 0.5)],
            vec![(2, 0), (2, 1)],
        )
        .with_tip_labels(["a", "b"]);
        let proj = Projection {
            nodes_x: vec![100.0, 100.0, 20.0],
            nodes_y: vec![20.0, 80.0, 50.0],
            radii: None,
            tips: None,
        };
        (mark, proj)
    }

    #[test]
    fn test_placement_linear() {
        let right = tip_label_placement(Layout::Right, 0.0, 15.0);
        assert_eq!(right.anchor, TextAnchor::Start);
        assert_eq!(right.anchor_shift, 15.0);
        for layout in [Layout::Left, Layout::Down] {
            let p = tip_label_placement(layout, 0.0, 15.0);
            assert_eq!(p.anchor, TextAnchor::End);
            assert_eq!(p.anchor_shift, -15.0);
        }
        assert_eq!(tip_label_placement(Layout::Up, -90.0, 15.0).anchor, TextAnchor::Start);
    }

    #[test]
    fn test_placement_radial_flip() {
        let flipped = tip_label_placement(Layout::Radial, -100.0, 15.0);
        assert_eq!(
            flipped,
            TipPlacement {
                anchor: TextAnchor::End,
                anchor_shift: -15.0,
                angle: 80.0
            }
        );
        let upright = tip_label_placement(Layout::Radial, -80.0, 15.0);
        assert_eq!(upright.anchor, TextAnchor::Start);
        assert_eq!(upright.angle, -80.0);
        // bounds are exclusive
        assert_eq!(tip_label_placement(Layout::Radial, -90.0, 15.0).anchor, TextAnchor::Start);
        assert_eq!(tip_label_placement(Layout::Radial, -270.0, 15.0).anchor, TextAnchor::Start);
    }

    #[test]
    fn test_tip_labels() {
        let (mut mark, proj) = fixture();
        mark.tip_labels_colors = vec![None, Some("blue".to_string())];
        let group = mark_tip_labels(&mark, &proj, &SceneConfig::default(), &HelveticaMetrics).unwrap();
        assert_eq!(group.attr("class"), Some("toytree-TipLabels"));
        assert_eq!(group.style().get("font-size"), Some("9px"));
        assert_eq!(group.children.len(), 2);

        let first = &group.children[0];
        assert_eq!(first.attr("transform"), Some("translate(100.00,20.00)rotate(0)"));
        let text = &first.children[0];
        assert_eq!(text.attr("x"), Some("15.00"));
        assert_eq!(text.text.as_deref(), Some("a"));
        assert_eq!(text.attr("style"), None);

        let colored = &group.children[1].children[0];
        assert_eq!(colored.style().get("fill"), Some("rgb(0%,0%,100%)"));
    }

    #[test]
    fn test_tip_style_updates_only_known_keys() {
        let (mut mark, proj) = fixture();
        mark.tip_labels_style = Style::from([("font-size", "14px"), ("letter-spacing", "2px")]);
        let group = mark_tip_labels(&mark, &proj, &SceneConfig::default(), &HelveticaMetrics).unwrap();
        let style = group.style();
        assert_eq!(style.get("font-size"), Some("14px"));
        assert!(!style.contains_key("letter-spacing"));
    }

    #[test]
    fn test_tip_labels_use_aligned_position() {
        let (mark, mut proj) = fixture();
        proj.tips = Some(vec![Point::new(140.0, 20.0), Point::new(140.0, 80.0)]);
        let group = mark_tip_labels(&mark, &proj, &SceneConfig::default(), &HelveticaMetrics).unwrap();
        assert_eq!(
            group.children[1].attr("transform"),
            Some("translate(140.00,80.00)rotate(0)")
        );
    }

    #[test]
    fn test_node_labels() {
        let (mut mark, proj) = fixture();
        mark.node_labels = vec![None, Some(" ".to_string()), Some("root".to_string())];
        mark.node_hover = vec![None, None, Some("the root".to_string())];
        let group = mark_node_labels(&mark, &proj, &SceneConfig::default(), &HelveticaMetrics).unwrap();
        let style = group.style();
        assert_eq!(style.get("stroke"), Some("none"));
        assert!(!style.contains_key("text-anchor"));
        assert_eq!(group.children.len(), 1);

        let label = &group.children[0];
        assert_eq!(label.children[0].tag, "title");
        assert_eq!(label.children[1].text.as_deref(), Some("root"));
        // centered on the node
        let width = HelveticaMetrics.text_width("root", 9.0);
        let expected = format!("translate({:.2},", 20.0 - width / 2.0);
        assert!(label.attr("transform").unwrap().starts_with(&expected));
    }

    #[test]
    fn test_node_labels_skipped() {
        let (mut mark, proj) = fixture();
        assert!(mark_node_labels(&mark, &proj, &SceneConfig::default(), &HelveticaMetrics).is_none());
        mark.node_labels = vec![Some(String::new()), None, Some(" ".to_string())];
        assert!(mark_node_labels(&mark, &proj, &SceneConfig::default(), &HelveticaMetrics).is_none());
    }
}
