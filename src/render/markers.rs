//! Node markers
//!
//! A marker is a shape from a closed vocabulary (`o`, `s`, `^`, `r2x1`,
//! `o+`, ...) drawn from four primitives: bar, triangle, rectangle and
//! circle. The primitives are produced through [`MarkerPrimitives`] so a
//! host graphics layer can substitute its own emitters.

use std::fmt;
use std::str::FromStr;

use crate::geometry::Projection;
use crate::mark::{MarkError, TreeMark};
use crate::scene::{Element, SceneGroup};
use crate::style::{fmt_num, split_rgba_style, style_delta, Style};

use super::config::SceneConfig;
use super::labels::is_blank;

/// Marker shapes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MarkerShape {
    /// `|`
    Bar,
    /// `/`
    Slash,
    /// `-`
    Dash,
    /// `\`
    Backslash,
    /// `+`
    Plus,
    /// `x`
    Cross,
    /// `*`
    Star,
    /// `^`
    TriangleUp,
    /// `>`
    TriangleRight,
    /// `v`
    TriangleDown,
    /// `<`
    TriangleLeft,
    /// `s`
    Square,
    /// `d`
    Diamond,
    /// `r<width>x<height>`, a rectangle with relative side lengths
    Rect { width: f64, height: f64 },
    /// `o`
    #[default]
    Circle,
    /// `oo`
    DoubleCircle,
    /// A circle with a bar glyph drawn over it (`o|`, `o/`, `o-`, `o\`, `o+`, `ox`, `o*`)
    Circled(BarGlyph),
}

/// Bar-based glyphs that may be drawn inside a circle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarGlyph {
    Bar,
    Slash,
    Dash,
    Backslash,
    Plus,
    Cross,
    Star,
}

impl BarGlyph {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '|' => Some(BarGlyph::Bar),
            '/' => Some(BarGlyph::Slash),
            '-' => Some(BarGlyph::Dash),
            '\\' => Some(BarGlyph::Backslash),
            '+' => Some(BarGlyph::Plus),
            'x' => Some(BarGlyph::Cross),
            '*' => Some(BarGlyph::Star),
            _ => None,
        }
    }

    fn code(&self) -> char {
        match self {
            BarGlyph::Bar => '|',
            BarGlyph::Slash => '/',
            BarGlyph::Dash => '-',
            BarGlyph::Backslash => '\\',
            BarGlyph::Plus => '+',
            BarGlyph::Cross => 'x',
            BarGlyph::Star => '*',
        }
    }

    /// Rotation of each bar, degrees counter-clockwise from vertical
    fn angles(&self) -> &'static [f64] {
        match self {
            BarGlyph::Bar => &[0.0],
            BarGlyph::Slash => &[-45.0],
            BarGlyph::Dash => &[90.0],
            BarGlyph::Backslash => &[45.0],
            BarGlyph::Plus => &[0.0, 90.0],
            BarGlyph::Cross => &[-45.0, 45.0],
            BarGlyph::Star => &[0.0, -60.0, 60.0],
        }
    }

    fn as_shape(&self) -> MarkerShape {
        match self {
            BarGlyph::Bar => MarkerShape::Bar,
            BarGlyph::Slash => MarkerShape::Slash,
            BarGlyph::Dash => MarkerShape::Dash,
            BarGlyph::Backslash => MarkerShape::Backslash,
            BarGlyph::Plus => MarkerShape::Plus,
            BarGlyph::Cross => MarkerShape::Cross,
            BarGlyph::Star => MarkerShape::Star,
        }
    }
}

/// A drawing primitive with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Bar { size: f64, angle: f64 },
    Triangle { size: f64, angle: f64 },
    Rect { size: f64, width: f64, height: f64, angle: f64 },
    Circle { size: f64 },
}

impl MarkerShape {
    fn glyph(&self) -> Option<BarGlyph> {
        match self {
            MarkerShape::Bar => Some(BarGlyph::Bar),
            MarkerShape::Slash => Some(BarGlyph::Slash),
            MarkerShape::Dash => Some(BarGlyph::Dash),
            MarkerShape::Backslash => Some(BarGlyph::Backslash),
            MarkerShape::Plus => Some(BarGlyph::Plus),
            MarkerShape::Cross => Some(BarGlyph::Cross),
            MarkerShape::Star => Some(BarGlyph::Star),
            _ => None,
        }
    }

    /// Primitives drawing this shape at `size`, in drawing order
    pub fn primitives(&self, size: f64) -> Vec<Primitive> {
        let bars = |glyph: BarGlyph| {
            glyph
                .angles()
                .iter()
                .map(move |&angle| Primitive::Bar { size, angle })
        };
        let triangle = |angle| vec![Primitive::Triangle { size, angle }];
        let rect = |width, height, angle| {
            vec![Primitive::Rect {
                size,
                width,
                height,
                angle,
            }]
        };

        if let Some(glyph) = self.glyph() {
            return bars(glyph).collect();
        }
        match *self {
            MarkerShape::TriangleUp => triangle(0.0),
            MarkerShape::TriangleRight => triangle(-90.0),
            MarkerShape::TriangleDown => triangle(180.0),
            MarkerShape::TriangleLeft => triangle(90.0),
            MarkerShape::Square => rect(1.0, 1.0, 0.0),
            MarkerShape::Diamond => rect(1.0, 1.0, 45.0),
            MarkerShape::Rect { width, height } => rect(width, height, 0.0),
            MarkerShape::DoubleCircle => vec![
                Primitive::Circle { size },
                Primitive::Circle { size: size / 2.0 },
            ],
            MarkerShape::Circled(glyph) => std::iter::once(Primitive::Circle { size })
                .chain(bars(glyph))
                .collect(),
            _ => vec![Primitive::Circle { size }],
        }
    }
}

impl fmt::Display for MarkerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(glyph) = self.glyph() {
            return write!(f, "{}", glyph.code());
        }
        match self {
            MarkerShape::TriangleUp => f.write_str("^"),
            MarkerShape::TriangleRight => f.write_str(">"),
            MarkerShape::TriangleDown => f.write_str("v"),
            MarkerShape::TriangleLeft => f.write_str("<"),
            MarkerShape::Square => f.write_str("s"),
            MarkerShape::Diamond => f.write_str("d"),
            MarkerShape::Rect { width, height } => {
                write!(f, "r{}x{}", fmt_num(*width), fmt_num(*height))
            }
            MarkerShape::DoubleCircle => f.write_str("oo"),
            MarkerShape::Circled(glyph) => write!(f, "o{}", glyph.code()),
            _ => f.write_str("o"),
        }
    }
}

impl FromStr for MarkerShape {
    type Err = MarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MarkError::InvalidMarker(s.to_string());
        let code = s.trim();
        let mut chars = code.chars();
        let (first, rest) = match chars.next() {
            Some(c) => (c, chars.as_str()),
            None => return Err(invalid()),
        };

        if rest.is_empty() {
            if let Some(glyph) = BarGlyph::from_char(first) {
                return Ok(glyph.as_shape());
            }
        }
        match (first, rest) {
            ('^', "") => Ok(MarkerShape::TriangleUp),
            ('>', "") => Ok(MarkerShape::TriangleRight),
            ('v', "") => Ok(MarkerShape::TriangleDown),
            ('<', "") => Ok(MarkerShape::TriangleLeft),
            ('s', "") => Ok(MarkerShape::Square),
            ('d', "") => Ok(MarkerShape::Diamond),
            ('o', "") => Ok(MarkerShape::Circle),
            ('o', "o") => Ok(MarkerShape::DoubleCircle),
            ('o', glyph) => {
                let mut gc = glyph.chars();
                match (gc.next().and_then(BarGlyph::from_char), gc.next()) {
                    (Some(glyph), None) => Ok(MarkerShape::Circled(glyph)),
                    _ => Err(invalid()),
                }
            }
            ('r', dims) => {
                let (w, h) = dims.split_once('x').ok_or_else(invalid)?;
                let width = w.parse::<f64>().map_err(|_| invalid())?;
                let height = h.parse::<f64>().map_err(|_| invalid())?;
                Ok(MarkerShape::Rect { width, height })
            }
            _ => Err(invalid()),
        }
    }
}

/// A marker: a shape plus an optional rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Marker {
    pub shape: MarkerShape,
    pub angle: Option<f64>,
}

impl Marker {
    pub fn new(shape: MarkerShape) -> Self {
        Self { shape, angle: None }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }
}

impl FromStr for Marker {
    type Err = MarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Marker::new(s.parse()?))
    }
}

/// Emitters for the marker drawing primitives
pub trait MarkerPrimitives {
    fn bar(&self, size: f64, angle: f64) -> Element;
    fn triangle(&self, size: f64, angle: f64) -> Element;
    fn rect(&self, size: f64, width: f64, height: f64, angle: f64) -> Element;
    fn circle(&self, size: f64) -> Element;

    fn draw(&self, primitive: &Primitive) -> Element {
        match *primitive {
            Primitive::Bar { size, angle } => self.bar(size, angle),
            Primitive::Triangle { size, angle } => self.triangle(size, angle),
            Primitive::Rect {
                size,
                width,
                height,
                angle,
            } => self.rect(size, width, height, angle),
            Primitive::Circle { size } => self.circle(size),
        }
    }
}

/// Primitives as plain SVG elements centered on the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPrimitives;

fn rotated(el: Element, angle: f64) -> Element {
    if angle != 0.0 {
        el.with_attr("transform", format!("rotate({})", fmt_num(-angle)))
    } else {
        el
    }
}

impl MarkerPrimitives for SvgPrimitives {
    fn bar(&self, size: f64, angle: f64) -> Element {
        let line = Element::new("line")
            .with_attr("y1", fmt_num(-size / 2.0))
            .with_attr("y2", fmt_num(size / 2.0));
        rotated(line, angle)
    }

    fn triangle(&self, size: f64, angle: f64) -> Element {
        let half = size / 2.0;
        let points = [(-half, half), (0.0, -half), (half, half)]
            .iter()
            .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
            .collect::<Vec<_>>()
            .join(" ");
        rotated(Element::new("polygon").with_attr("points", points), angle)
    }

    fn rect(&self, size: f64, width: f64, height: f64, angle: f64) -> Element {
        let rect = Element::new("rect")
            .with_attr("x", fmt_num(-size / 2.0 * width))
            .with_attr("y", fmt_num(-size / 2.0 * height))
            .with_attr("width", fmt_num(size * width))
            .with_attr("height", fmt_num(size * height));
        rotated(rect, angle)
    }

    fn circle(&self, size: f64) -> Element {
        Element::new("circle").with_attr("r", fmt_num(size / 2.0))
    }
}

/// Node marker pass; `None` when no node has a positive size
pub fn mark_nodes(
    mark: &TreeMark,
    proj: &Projection,
    scene: &SceneConfig,
    primitives: &dyn MarkerPrimitives,
) -> Option<Element> {
    let sized: Vec<(usize, f64)> = (0..mark.nnodes())
        .filter_map(|idx| mark.node_size(idx).filter(|s| *s > 0.0).map(|s| (idx, s)))
        .collect();
    if sized.is_empty() {
        log::debug!("node markers skipped: no node has a size");
        return None;
    }

    let group_style = split_rgba_style(&mark.node_style);
    let mut group = Element::group()
        .with_attr("class", SceneGroup::Nodes.class(&scene.class_prefix))
        .with_style(&group_style);

    for &(idx, size) in &sized {
        let marker = mark.node_marker(idx);
        let delta = mark
            .node_color(idx)
            .map(|fill| style_delta(&Style::new().with("fill", fill), &group_style))
            .unwrap_or_default();

        let p = proj.node(idx);
        let mut transform = format!("translate({:.3},{:.3})", p.x, p.y);
        if let Some(angle) = marker.angle.filter(|a| *a != 0.0) {
            transform.push_str(&format!(" rotate({:.1})", -angle));
        }

        let mut el = Element::group()
            .with_attr("id", format!("node-{}", idx))
            .with_style(&delta)
            .with_attr("transform", transform);

        let label = mark.node_label(idx).filter(|l| !is_blank(l));
        if let (Some(hover), None) = (mark.node_hover(idx), label) {
            el.push(Element::new("title").with_text(hover));
        }
        for primitive in marker.shape.primitives(size) {
            el.push(primitives.draw(&primitive));
        }
        group.push(el);
    }

    log::debug!("node markers: {} of {} nodes", sized.len(), mark.nnodes());
    Some(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_shapes() {
        assert_eq!("o".parse::<MarkerShape>(), Ok(MarkerShape::Circle));
        assert_eq!("oo".parse::<MarkerShape>(), Ok(MarkerShape::DoubleCircle));
        assert_eq!("|".parse::<MarkerShape>(), Ok(MarkerShape::Bar));
        assert_eq!(
            "o*".parse::<MarkerShape>(),
            Ok(MarkerShape::Circled(BarGlyph::Star))
        );
        assert_eq!(
            "r2x1".parse::<MarkerShape>(),
            Ok(MarkerShape::Rect {
                width: 2.0,
                height: 1.0
            })
        );
        assert!("q".parse::<MarkerShape>().is_err());
        assert!("r2".parse::<MarkerShape>().is_err());
        assert!("o++".parse::<MarkerShape>().is_err());
        assert!("".parse::<MarkerShape>().is_err());
    }

    #[test]
    fn test_display_roundtrips_codes() {
        for code in ["|", "/", "-", "\\", "+", "x", "*", "^", ">", "v", "<", "s", "d", "o", "oo", "o|", "ox", "r1.5x2"] {
            let shape: MarkerShape = code.parse().unwrap();
            assert_eq!(shape.to_string(), code);
        }
    }

    #[test]
    fn test_primitives() {
        assert_eq!(
            MarkerShape::Star.primitives(10.0),
            vec![
                Primitive::Bar { size: 10.0, angle: 0.0 },
                Primitive::Bar { size: 10.0, angle: -60.0 },
                Primitive::Bar { size: 10.0, angle: 60.0 },
            ]
        );
        assert_eq!(MarkerShape::Circled(BarGlyph::Plus).primitives(4.0).len(), 3);
        assert_eq!(
            MarkerShape::DoubleCircle.primitives(8.0)[1],
            Primitive::Circle { size: 4.0 }
        );
    }

    #[test]
    fn test_svg_primitives() {
        let p = SvgPrimitives;
        assert_eq!(p.circle(10.0).attr("r"), Some("5"));
        let bar = p.bar(10.0, -45.0);
        assert_eq!(bar.attr("y1"), Some("-5"));
        assert_eq!(bar.attr("transform"), Some("rotate(45)"));
        assert_eq!(p.bar(10.0, 0.0).attr("transform"), None);
        assert_eq!(p.triangle(4.0, 0.0).attr("points"), Some("-2,2 0,-2 2,2"));
        let rect = p.rect(10.0, 2.0, 1.0, 0.0);
        assert_eq!(rect.attr("x"), Some("-10"));
        assert_eq!(rect.attr("height"), Some("10"));
    }

    fn two_node_mark() -> (TreeMark, Projection) {
        let mark = TreeMark::new(vec![Point::new(1.0, 0.0), Point::new(0.0, 0.0)], vec![(1, 0)]);
        let proj = Projection {
            nodes_x: vec![100.0, 20.0],
            nodes_y: vec![50.0, 50.0],
            radii: None,
            tips: None,
        };
        (mark, proj)
    }

    #[test]
    fn test_nodes_skipped_without_sizes() {
        let (mark, proj) = two_node_mark();
        assert!(mark_nodes(&mark, &proj, &SceneConfig::default(), &SvgPrimitives).is_none());
        let mark = mark.with_node_sizes(vec![Some(0.0), None]);
        assert!(mark_nodes(&mark, &proj, &SceneConfig::default(), &SvgPrimitives).is_none());
    }

    #[test]
    fn test_node_groups() {
        let (mut mark, proj) = two_node_mark();
        mark.node_sizes = vec![Some(8.0), Some(6.0)];
        mark.node_markers = vec![Marker::new(MarkerShape::Square).with_angle(30.0), Marker::default()];
        mark.node_colors = vec![Some("rgba(100%,0%,0%,0.5)".to_string()), None];
        mark.node_hover = vec![Some("tip".to_string()), None];

        let group = mark_nodes(&mark, &proj, &SceneConfig::default(), &SvgPrimitives).unwrap();
        assert_eq!(group.attr("class"), Some("toytree-Nodes"));
        assert_eq!(group.children.len(), 2);

        let first = &group.children[0];
        assert_eq!(first.attr("id"), Some("node-0"));
        assert_eq!(first.attr("transform"), Some("translate(100.000,50.000) rotate(-30.0)"));
        assert_eq!(
            first.attr("style"),
            Some("fill:rgb(100%,0%,0%);fill-opacity:0.5")
        );
        assert_eq!(first.children[0].tag, "title");
        assert_eq!(first.children[1].tag, "rect");

        let second = &group.children[1];
        assert_eq!(second.attr("style"), None);
        assert_eq!(second.children[0].tag, "circle");
    }

    #[test]
    fn test_hover_moves_to_label() {
        let (mut mark, proj) = two_node_mark();
        mark.node_sizes = vec![Some(8.0), None];
        mark.node_hover = vec![Some("tip".to_string()), None];
        mark.node_labels = vec![Some("A".to_string()), None];
        let group = mark_nodes(&mark, &proj, &SceneConfig::default(), &SvgPrimitives).unwrap();
        assert_eq!(group.children[0].count("title"), 0);
    }

    #[test]
    fn test_hover_kept_for_blank_label() {
        let (mut mark, proj) = two_node_mark();
        mark.node_sizes = vec![Some(8.0), Some(8.0)];
        mark.node_hover = vec![Some("tip".to_string()), Some("root".to_string())];
        mark.node_labels = vec![Some(String::new()), Some(" ".to_string())];
        let group = mark_nodes(&mark, &proj, &SceneConfig::default(), &SvgPrimitives).unwrap();
        assert_eq!(group.children[0].count("title"), 1);
        assert_eq!(group.children[1].count("title"), 1);
    }
}
