use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::app::Panels;

const MAP_HIGHLIGHT_CLASS: &str = "segment-hovered";
const TIMELINE_HIGHLIGHT_CLASS: &str = "timeline-segment-rect-hovered";

/// ID of the map segment under a map hover event, if any. Hover lands on
/// the line primitives inside a segment group; the ID lives on the group.
fn map_segment_id(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    if target.tag_name() != "line" {
        return None;
    }
    target.parent_element()?.get_attribute("id")
}

/// ID of the timeline segment under a timeline event. Timeline segments are
/// rects, or polygons where the generator bevels them; either carries the
/// ID directly.
pub(crate) fn timeline_segment_id(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let tag = target.tag_name();
    if tag != "rect" && tag != "polygon" {
        return None;
    }
    target.get_attribute("id")
}

fn timeline_counterpart(id: &str) -> String {
    format!("rect#{id}")
}

fn map_counterpart(id: &str) -> String {
    format!("g#{id}.segment")
}

/// Toggle a highlight class on the counterpart matched by `selector`.
/// Missing counterparts are left alone.
fn toggle(panel: &Element, selector: &str, class: &str, on: bool) {
    let Ok(Some(counterpart)) = panel.query_selector(selector) else {
        return;
    };
    let class_list = counterpart.class_list();
    if on {
        class_list.add_1(class).ok();
    } else {
        class_list.remove_1(class).ok();
    }
}

/// Cross-view hover: entering a segment in one view highlights its
/// counterpart in the other, symmetric in both directions.
pub fn attach(panels: &Panels, listeners: &mut Vec<EventListener>) {
    for (event_type, on) in [("mouseover", true), ("mouseout", false)] {
        listeners.push(EventListener::new(&panels.map, event_type, {
            let timeline = panels.timeline.clone();
            move |event| {
                let Some(id) = map_segment_id(event) else {
                    return;
                };
                toggle(
                    &timeline,
                    &timeline_counterpart(&id),
                    TIMELINE_HIGHLIGHT_CLASS,
                    on,
                );
            }
        }));
        listeners.push(EventListener::new(&panels.timeline, event_type, {
            let map = panels.map.clone();
            move |event| {
                let Some(id) = timeline_segment_id(event) else {
                    return;
                };
                toggle(&map, &map_counterpart(&id), MAP_HIGHLIGHT_CLASS, on);
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::{map_counterpart, timeline_counterpart};

    #[test]
    fn counterpart_selectors_pair_the_views() {
        assert_eq!(timeline_counterpart("s3"), "rect#s3");
        assert_eq!(map_counterpart("s3"), "g#s3.segment");
    }
}
