mod app;
mod hover;
mod layout;
mod map;
mod selection;

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    app::bind(&document);
}
