use web_sys::console;

use pelorus_core::PanelLayout;

use crate::app::Panels;

/// Re-measure the panels and re-apply the computed layout. Runs once at
/// bind and again on every window resize.
pub fn reconcile(panels: &Panels) {
    let root = panels.root.get_bounding_client_rect();
    let legend_height = panels.legend.get_bounding_client_rect().height();
    let timeline_height = panels.timeline.get_bounding_client_rect().height();

    console::log_1(
        &format!(
            "layout: root {}x{}, legend {}, timeline {}",
            root.width(),
            root.height(),
            legend_height,
            timeline_height,
        )
        .into(),
    );

    let layout = PanelLayout::compute(
        root.width(),
        root.height(),
        legend_height,
        timeline_height,
    );
    panels
        .map
        .set_attribute("height", &layout.map_height.to_string())
        .ok();
    panels
        .timeline
        .set_attribute("y", &layout.timeline_y.to_string())
        .ok();
    panels
        .timeline
        .set_attribute("width", &layout.timeline_width.to_string())
        .ok();
}
