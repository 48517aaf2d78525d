/// Gap kept under the timeline panel, in root pixels.
const TIMELINE_BOTTOM_MARGIN: f64 = 20.0;
/// Horizontal inset of the timeline panel.
const TIMELINE_SIDE_MARGIN: f64 = 40.0;

/// Panel geometry derived from one measurement of the root document.
///
/// The map takes whatever vertical room the legend and timeline leave; the
/// timeline sits above the bottom margin at near-full width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub map_height: f64,
    pub timeline_y: f64,
    pub timeline_width: f64,
}

impl PanelLayout {
    pub fn compute(
        root_width: f64,
        root_height: f64,
        legend_height: f64,
        timeline_height: f64,
    ) -> Self {
        Self {
            map_height: root_height - legend_height - timeline_height,
            timeline_y: root_height - timeline_height - TIMELINE_BOTTOM_MARGIN,
            timeline_width: root_width - TIMELINE_SIDE_MARGIN,
        }
    }
}
