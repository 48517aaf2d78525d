use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent, SvgElement, WheelEvent};

use pelorus_core::{ViewBox, Viewport};

/// Write the authoritative window back to a panel's `viewBox` attribute.
pub fn apply_view(panel: &Element, view: ViewBox) {
    panel.set_attribute("viewBox", &view.to_attr()).ok();
}

fn set_cursor(panel: &Element, cursor: &str) {
    if let Some(svg) = panel.dyn_ref::<SvgElement>() {
        svg.style().set_property("cursor", cursor).ok();
    }
}

/// Wire pan (drag) and zoom (wheel) on the map panel.
///
/// The drag-move listener only exists between mousedown and mouseup/leave,
/// so a move can never observe a drag that hasn't started.
pub fn attach(map: &Element, viewport: &Rc<RefCell<Viewport>>, listeners: &mut Vec<EventListener>) {
    let drag_move: Rc<RefCell<Option<EventListener>>> = Rc::new(RefCell::new(None));

    listeners.push(EventListener::new(map, "mousedown", {
        let map = map.clone();
        let viewport = viewport.clone();
        let drag_move = drag_move.clone();
        move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            set_cursor(&map, "grabbing");
            viewport
                .borrow_mut()
                .drag_start(event.client_x() as f64, event.client_y() as f64);
            *drag_move.borrow_mut() = Some(drag_move_listener(&map, &viewport));
        }
    }));

    for stop_event in ["mouseup", "mouseleave"] {
        listeners.push(EventListener::new(map, stop_event, {
            let map = map.clone();
            let viewport = viewport.clone();
            let drag_move = drag_move.clone();
            move |_event| {
                drag_move.borrow_mut().take();
                viewport.borrow_mut().drag_stop();
                set_cursor(&map, "auto");
            }
        }));
    }

    // Non-passive so preventDefault can stop the page from scrolling.
    let options = EventListenerOptions::enable_prevent_default();
    listeners.push(EventListener::new_with_options(map, "wheel", options, {
        let map = map.clone();
        let viewport = viewport.clone();
        move |event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            let rect = map.get_bounding_client_rect();
            let committed = viewport.borrow_mut().wheel_zoom(
                event.delta_x(),
                event.delta_y(),
                event.client_x() as f64 - rect.left(),
                event.client_y() as f64 - rect.top(),
                rect.width(),
                rect.height(),
            );
            if let Some(view) = committed {
                apply_view(&map, view);
            }
        }
    }));
}

fn drag_move_listener(map: &Element, viewport: &Rc<RefCell<Viewport>>) -> EventListener {
    EventListener::new(map, "mousemove", {
        let map = map.clone();
        let viewport = viewport.clone();
        move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let moved = viewport
                .borrow_mut()
                .drag_move(event.client_x() as f64, event.client_y() as f64);
            if let Some(view) = moved {
                apply_view(&map, view);
            }
        }
    })
}
