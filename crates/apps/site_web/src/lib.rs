use console_error_panic_hook::set_once;
use gloo_events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod dom;
mod error;
mod logging;
mod manifest;
mod model_viewer;
mod page_controller;
mod wgpu;

pub use error::SiteError;
pub use manifest::{MANIFEST_VERSION, SiteManifest};

use model_viewer::{ViewerApp, report_bootstrap_error};
use page_controller::PageController;

#[derive(Default)]
struct SiteState {
    page: Option<Rc<RefCell<PageController>>>,
    viewer: Option<Rc<RefCell<ViewerApp>>>,
}

thread_local! {
    static STATE: RefCell<SiteState> = RefCell::new(SiteState::default());
}

fn viewer_app() -> Option<Rc<RefCell<ViewerApp>>> {
    STATE.with(|s| s.borrow().viewer.clone())
}

fn page_controller() -> Option<Rc<RefCell<PageController>>> {
    STATE.with(|s| s.borrow().page.clone())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    let document = dom::document()?;
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| {
            if let Err(err) = boot() {
                web_sys::console::error_1(&err);
            }
        })
        .forget();
        Ok(())
    } else {
        boot()
    }
}

/// Mount the page and the viewer from the embedded manifest. Calling it
/// again once mounted does nothing.
#[wasm_bindgen]
pub fn boot() -> Result<(), JsValue> {
    if STATE.with(|s| s.borrow().page.is_some()) {
        tracing::debug!("already booted");
        return Ok(());
    }
    mount(SiteManifest::embedded()?)
}

/// Mount from a caller-supplied manifest, replacing anything mounted before.
#[wasm_bindgen]
pub fn boot_with_manifest(json: &str) -> Result<(), JsValue> {
    let manifest = SiteManifest::from_json(json)?;
    let previous = STATE.with(|s| std::mem::take(&mut *s.borrow_mut()));
    if let Some(viewer) = previous.viewer {
        viewer.borrow_mut().stop();
    }
    mount(manifest)
}

fn mount(manifest: SiteManifest) -> Result<(), JsValue> {
    logging::init_logging(&manifest.log_filter);
    tracing::info!(version = %manifest.version, "booting site");

    // The two halves are independent: either may fail without the other.
    let viewer = match ViewerApp::mount(manifest.viewer) {
        Ok(app) => Some(app),
        Err(err) => {
            report_bootstrap_error(&err);
            None
        }
    };

    let has_viewer = viewer.is_some();
    STATE.with(|s| s.borrow_mut().viewer = viewer);

    let page = PageController::mount(manifest.page)?;
    if has_viewer {
        page.borrow_mut().set_progress_observer(Box::new(|progress| {
            if let Some(app) = viewer_app() {
                app.borrow_mut().set_scroll_progress(progress);
            }
        }));
    }
    STATE.with(|s| s.borrow_mut().page = Some(page));
    Ok(())
}

#[wasm_bindgen]
pub fn set_filter(category: &str) -> Result<(), JsValue> {
    let page = page_controller().ok_or_else(|| JsValue::from_str("site not booted"))?;
    page.borrow_mut().set_filter(category);
    Ok(())
}

/// Drive the viewer directly; returns the canvas opacity, or `None` when no
/// viewer is mounted.
#[wasm_bindgen]
pub fn set_scroll_progress(progress: f64) -> Option<f64> {
    viewer_app().map(|app| app.borrow_mut().set_scroll_progress(progress))
}

#[wasm_bindgen]
pub fn stop_render_loop() {
    if let Some(app) = viewer_app() {
        app.borrow_mut().stop();
    }
}

#[wasm_bindgen]
pub fn start_render_loop() {
    if let Some(app) = viewer_app() {
        ViewerApp::start(&app);
    }
}
