use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, SvgGraphicsElement};

use pelorus_core::{DragSelection, ViewBox};

use crate::app::Panels;
use crate::hover;
use crate::map;

const OVERLAY_CLASS: &str = "timeline-selection";
const HIDDEN_CLASS: &str = "segment-hidden";
const SVG_NS: &str = "http://www.w3.org/2000/svg";

struct ActiveDrag {
    selection: DragSelection,
    overlay: Element,
    move_listener: EventListener,
}

/// One timeline drag-selection at a time: seeds on mousedown over a
/// segment, accumulates while the pointer moves across further segments,
/// and on release narrows the timeline window to the swept span and hides
/// every map segment outside it.
pub struct SelectionController {
    document: Document,
    map: Element,
    timeline: Element,
    timeline_view: ViewBox,
    active: Option<ActiveDrag>,
}

impl SelectionController {
    pub fn shared(document: &Document, panels: &Panels) -> Option<Rc<RefCell<Self>>> {
        let Some(attr) = panels.timeline.get_attribute("viewBox") else {
            web_sys::console::warn_1(&"timeline has no viewBox".into());
            return None;
        };
        let Some(timeline_view) = ViewBox::from_attr(&attr) else {
            web_sys::console::warn_1(&format!("timeline viewBox unreadable: {attr}").into());
            return None;
        };
        Some(Rc::new(RefCell::new(Self {
            document: document.clone(),
            map: panels.map.clone(),
            timeline: panels.timeline.clone(),
            timeline_view,
            active: None,
        })))
    }

    /// Seed a drag from the segment under the press, or stay idle when the
    /// press lands on non-segment geometry. A session left dangling by a
    /// lost mouseup is discarded here.
    fn start(&mut self, event: &Event, controller: &Rc<RefCell<Self>>) {
        if let Some(stale) = self.active.take() {
            stale.overlay.remove();
        }

        let Some(id) = hover::timeline_segment_id(event) else {
            return;
        };
        let Some(bbox) = segment_bbox(event) else {
            return;
        };
        let Some(selection) = DragSelection::begin(&id, bbox.0, bbox.1) else {
            return;
        };

        let Ok(overlay) = self.document.create_element_ns(Some(SVG_NS), "rect") else {
            return;
        };
        overlay.set_attribute("class", OVERLAY_CLASS).ok();
        overlay.set_attribute("x", &selection.x().to_string()).ok();
        overlay
            .set_attribute("y", &self.timeline_view.min_y.to_string())
            .ok();
        overlay
            .set_attribute("width", &selection.width().to_string())
            .ok();
        overlay
            .set_attribute("height", &self.timeline_view.height.to_string())
            .ok();
        if self.timeline.append_child(&overlay).is_err() {
            return;
        }

        let move_listener = EventListener::new(&self.timeline, "mousemove", {
            let controller = controller.clone();
            move |event| controller.borrow_mut().extend(event)
        });

        self.active = Some(ActiveDrag {
            selection,
            overlay,
            move_listener,
        });
    }

    /// Absorb the segment under a drag move, growing the overlay by the
    /// entered segment's width. Moves over the overlay itself, non-segment
    /// geometry, or segments already inside the range change nothing.
    fn extend(&mut self, event: &Event) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let target_node: &web_sys::Node = target.as_ref();
        if active.overlay.is_same_node(Some(target_node)) {
            return;
        }
        let Some(id) = hover::timeline_segment_id(event) else {
            return;
        };
        let Some((_, width)) = segment_bbox(event) else {
            return;
        };
        if active.selection.extend(&id, width) {
            active
                .overlay
                .set_attribute("width", &active.selection.width().to_string())
                .ok();
        }
    }

    /// Commit the drag: narrow the timeline window to the overlay span,
    /// remove the overlay, and hide every map segment group outside the
    /// selected range. A release with no active drag is a no-op.
    fn finish(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let ActiveDrag {
            selection,
            overlay,
            move_listener,
        } = active;
        drop(move_listener);

        self.timeline_view.min_x = selection.x();
        self.timeline_view.width = selection.width();
        map::apply_view(&self.timeline, self.timeline_view);
        overlay.remove();

        let range = selection.range();
        web_sys::console::log_1(
            &format!("selection: segments {}..{}", range.min(), range.max()).into(),
        );

        let children = self.map.children();
        for index in 0..children.length() {
            let Some(child) = children.item(index) else {
                continue;
            };
            if child.tag_name() != "g" || !child.class_list().contains("segment") {
                continue;
            }
            // A group without an ID is outside any range, like any other
            // ID that carries no ordinal.
            let id = child.get_attribute("id").unwrap_or_default();
            if !selection.contains(&id) {
                child.class_list().add_1(HIDDEN_CLASS).ok();
            }
        }
    }
}

/// User-space x and width of the segment under an event's target.
fn segment_bbox(event: &Event) -> Option<(f64, f64)> {
    let target = event.target()?.dyn_into::<SvgGraphicsElement>().ok()?;
    let bbox = target.get_b_box().ok()?;
    Some((bbox.x() as f64, bbox.width() as f64))
}

/// Wire the selection session to the timeline panel. The drag-move listener
/// only exists while a drag is active; release or leaving the panel commits.
pub fn attach(
    controller: &Rc<RefCell<SelectionController>>,
    panels: &Panels,
    listeners: &mut Vec<EventListener>,
) {
    listeners.push(EventListener::new(&panels.timeline, "mousedown", {
        let controller = controller.clone();
        move |event| {
            let shared = controller.clone();
            controller.borrow_mut().start(event, &shared);
        }
    }));

    for stop_event in ["mouseup", "mouseleave"] {
        listeners.push(EventListener::new(&panels.timeline, stop_event, {
            let controller = controller.clone();
            move |_event| controller.borrow_mut().finish()
        }));
    }
}
