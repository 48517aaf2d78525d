use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

use pelorus_core::{ViewBox, Viewport};

use crate::selection::SelectionController;
use crate::{hover, layout, map, selection};

/// Keyboard pan step in map user units.
const KEY_PAN_STEP: f64 = 50.0;
/// Synthetic wheel delta for keyboard zoom, one notch of a mouse wheel.
const KEY_ZOOM_DELTA: f64 = 120.0;

/// The fixed panels this controller binds to, all rendered ahead of time by
/// the track generator.
#[derive(Clone)]
pub struct Panels {
    pub root: Element,
    pub map: Element,
    pub legend: Element,
    pub timeline: Element,
}

impl Panels {
    fn find(document: &Document) -> Option<Self> {
        Some(Self {
            root: query(document, "svg#root")?,
            map: query(document, "svg#map")?,
            legend: query(document, "g#legend")?,
            timeline: query(document, "svg#timeline")?,
        })
    }
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    let found = document.query_selector(selector).ok().flatten();
    if found.is_none() {
        web_sys::console::warn_1(&format!("panel not found: {selector}").into());
    }
    found
}

/// Everything that must stay alive for the page's lifetime. Dropping this
/// detaches every listener.
pub struct AppBinding {
    _listeners: Vec<EventListener>,
}

thread_local! {
    static APP_BINDING: RefCell<Option<AppBinding>> = const { RefCell::new(None) };
}

/// Locate the panels and wire every interaction. If `bind` is re-entered
/// (dev/hot-reload runtime quirks), the previous binding is dropped first so
/// stale listeners can't keep mutating panel state.
pub fn bind(document: &Document) {
    APP_BINDING.with(|slot| {
        let _old = slot.borrow_mut().take();
        let Some(binding) = build(document) else {
            return;
        };
        *slot.borrow_mut() = Some(binding);
    });
}

fn build(document: &Document) -> Option<AppBinding> {
    let panels = Panels::find(document)?;

    layout::reconcile(&panels);

    let viewport = Rc::new(RefCell::new(Viewport::new(initial_view(&panels.map)?)));
    let controller = SelectionController::shared(document, &panels)?;

    let mut listeners = Vec::new();
    map::attach(&panels.map, &viewport, &mut listeners);
    hover::attach(&panels, &mut listeners);
    selection::attach(&controller, &panels, &mut listeners);
    attach_resize(&panels, &mut listeners);
    attach_keyboard(&panels.map, &viewport, &mut listeners);

    Some(AppBinding {
        _listeners: listeners,
    })
}

fn initial_view(map: &Element) -> Option<ViewBox> {
    let Some(attr) = map.get_attribute("viewBox") else {
        web_sys::console::warn_1(&"map has no viewBox".into());
        return None;
    };
    let view = ViewBox::from_attr(&attr);
    if view.is_none() {
        web_sys::console::warn_1(&format!("map viewBox unreadable: {attr}").into());
    }
    view
}

fn attach_resize(panels: &Panels, listeners: &mut Vec<EventListener>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    listeners.push(EventListener::new(&window, "resize", {
        let panels = panels.clone();
        move |_event| layout::reconcile(&panels)
    }));
}

fn attach_keyboard(
    map: &Element,
    viewport: &Rc<RefCell<Viewport>>,
    listeners: &mut Vec<EventListener>,
) {
    let Some(window) = web_sys::window() else {
        return;
    };
    listeners.push(EventListener::new(&window, "keydown", {
        let map = map.clone();
        let viewport = viewport.clone();
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let mut vp = viewport.borrow_mut();
            let view = match event.key().as_str() {
                "ArrowLeft" => Some(vp.pan_by(-KEY_PAN_STEP, 0.0)),
                "ArrowRight" => Some(vp.pan_by(KEY_PAN_STEP, 0.0)),
                "ArrowUp" => Some(vp.pan_by(0.0, -KEY_PAN_STEP)),
                "ArrowDown" => Some(vp.pan_by(0.0, KEY_PAN_STEP)),
                "+" | "=" => center_zoom(&map, &mut vp, -KEY_ZOOM_DELTA),
                "-" => center_zoom(&map, &mut vp, KEY_ZOOM_DELTA),
                "0" => Some(vp.reset()),
                _ => return,
            };
            event.prevent_default();
            if let Some(view) = view {
                map::apply_view(&map, view);
            }
        }
    }));
}

/// Zoom about the map's on-screen center through the wheel path.
fn center_zoom(map: &Element, viewport: &mut Viewport, delta_y: f64) -> Option<ViewBox> {
    let rect = map.get_bounding_client_rect();
    viewport.wheel_zoom(
        KEY_ZOOM_DELTA,
        delta_y,
        rect.width() / 2.0,
        rect.height() / 2.0,
        rect.width(),
        rect.height(),
    )
}
