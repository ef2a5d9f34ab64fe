//! Edge, align-edge and admixture-edge passes

use crate::geometry::{align_paths, edge_paths, AdmixtureRouter, GeometryError, Projection};
use crate::mark::TreeMark;
use crate::scene::{Element, SceneGroup};
use crate::style::{edge_style_deltas, style_delta, Style};

use super::config::SceneConfig;

/// Shared style of the admixture edge group
pub fn default_admixture_style() -> Style {
    Style::from([
        ("fill", "none"),
        ("font-size", "14px"),
        ("stroke", "rgb(90.6%,54.1%,76.5%)"),
        ("stroke-linecap", "round"),
        ("stroke-opacity", "0.6"),
        ("stroke-width", "5"),
    ])
}

/// Keys forced onto admixture label text
fn admixture_label_style(edge_style: &Style) -> Style {
    edge_style
        .clone()
        .with("fill", "#262626")
        .with("fill-opacity", "1.0")
        .with("stroke", "none")
        .with("text-anchor", "middle")
}

/// Tree edge pass; `None` when the tree has no edges
pub fn mark_edges(mark: &TreeMark, proj: &Projection, scene: &SceneConfig) -> Option<Element> {
    if mark.edges.is_empty() {
        log::debug!("edges skipped: empty edge table");
        return None;
    }

    let group_style = mark.edge_style.clone().with("fill", "none");
    let deltas = edge_style_deltas(
        mark.edges.len(),
        &mark.edge_colors,
        &mark.edge_widths,
        &group_style,
    );

    let mut group = Element::group()
        .with_attr("class", SceneGroup::Edges.class(&scene.class_prefix))
        .with_style(&group_style);

    let paths = edge_paths(&mark.edges, proj, mark.layout, mark.edge_type);
    for path in &paths {
        group.push(
            Element::new("path")
                .with_attr("d", path.d())
                .with_attr("id", path.key())
                .with_style(&deltas[path.row]),
        );
    }

    log::debug!(
        "edges: {} paths ({} layout, {} style)",
        paths.len(),
        mark.layout,
        mark.edge_type
    );
    Some(group)
}

/// Align-edge pass; `None` unless tips are aligned
pub fn mark_align_edges(
    mark: &TreeMark,
    proj: &Projection,
    scene: &SceneConfig,
) -> Option<Element> {
    if !mark.tip_labels_align || mark.ntips() == 0 {
        log::debug!("align edges skipped: tip alignment off");
        return None;
    }

    let mut group = Element::group()
        .with_attr("class", SceneGroup::AlignEdges.class(&scene.class_prefix))
        .with_style(&mark.edge_align_style);

    let paths = align_paths(proj, mark.ntips());
    for path in &paths {
        group.push(Element::new("path").with_attr("d", path.to_svg_d()));
    }

    log::debug!("align edges: {} paths", paths.len());
    Some(group)
}

/// Admixture-edge pass; `None` when the mark carries no admixture edges
pub fn mark_admixture_edges(
    mark: &TreeMark,
    proj: &Projection,
    scene: &SceneConfig,
) -> Result<Option<Element>, GeometryError> {
    if mark.admixture_edges.is_empty() {
        log::debug!("admixture edges skipped: none given");
        return Ok(None);
    }

    let group_style = default_admixture_style();
    let mut group = Element::group()
        .with_attr("class", SceneGroup::AdmixEdges.class(&scene.class_prefix))
        .with_style(&group_style);

    let router = AdmixtureRouter::new(&mark.edges, proj, mark.layout, mark.edge_type)
        .with_label_offset(scene.admixture_label_offset);

    for edge in &mark.admixture_edges {
        let routed = router.route(edge)?;
        let edge_style = edge.style.clone().unwrap_or_default();

        group.push(
            Element::new("path")
                .with_attr("d", routed.path().to_svg_d())
                .with_style(&style_delta(&edge_style, &group_style)),
        );

        if let (Some(label), Some(pos)) = (&edge.label, routed.label_pos) {
            group.push(
                Element::new("text")
                    .with_attr("x", format!("{:.2}", pos.x))
                    .with_attr("y", format!("{:.2}", pos.y))
                    .with_style(&admixture_label_style(&edge_style))
                    .with_text(label.as_str()),
            );
        }
    }

    log::debug!("admixture edges: {}", mark.admixture_edges.len());
    Ok(Some(group))
}
