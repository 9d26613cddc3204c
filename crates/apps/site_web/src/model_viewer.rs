//! Browser shell around `viewer::ModelViewer`: canvas, status element,
//! streamed asset fetch, animation-frame loop and input listeners.

use std::cell::RefCell;
use std::rc::Rc;

use formats::{ExternalResources, LoadProgress, ModelLoadError, external_resources};
use foundation::time::Time;
use gloo_events::EventListener;
use gloo_net::http::Request;
use gloo_render::{AnimationFrame, request_animation_frame};
use gloo_timers::callback::Timeout;
use viewer::{ModelViewer, Status, ViewerConfig, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::dom;
use crate::error::SiteError;
use crate::wgpu::{WgpuBackend, init_backend};

pub const CANVAS_ID: &str = "hero-canvas";
pub const STATUS_ID: &str = "model-status";

pub struct ViewerApp {
    viewer: ModelViewer,
    backend: Option<WgpuBackend>,
    window: Window,
    canvas: HtmlCanvasElement,
    status: Option<HtmlElement>,
    hide_timer: Option<Timeout>,
    pending_frame: Option<AnimationFrame>,
    listeners: Vec<EventListener>,
}

/// Show a status line without a viewer, e.g. when the canvas is missing.
pub fn report_bootstrap_error(err: &SiteError) {
    tracing::error!(error = %err, "viewer bootstrap failed");
    if let Ok(document) = dom::document() {
        if let Some(el) = dom::by_id(&document, STATUS_ID) {
            el.set_text_content(Some(&Status::Error(err.to_string()).message()));
        }
    }
}

fn current_viewport(window: &Window) -> Viewport {
    Viewport::new(
        dom::inner_width(window),
        dom::inner_height(window),
        window.device_pixel_ratio(),
    )
}

impl ViewerApp {
    pub fn mount(config: ViewerConfig) -> Result<Rc<RefCell<Self>>, SiteError> {
        let window = dom::window()?;
        let document = dom::document()?;
        let canvas: HtmlCanvasElement = dom::require_by_id(&document, CANVAS_ID)?;
        let status = dom::by_id(&document, STATUS_ID).and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let viewport = current_viewport(&window);
        let (width, height) = viewport.physical_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let app = Rc::new(RefCell::new(Self {
            viewer: ModelViewer::new(config, viewport),
            backend: None,
            window,
            canvas: canvas.clone(),
            status,
            hide_timer: None,
            pending_frame: None,
            listeners: Vec::new(),
        }));
        app.borrow_mut().flush_status();

        Self::install_listeners(&app);
        Self::spawn_backend(&app, canvas, width, height);
        Self::spawn_load(&app);
        Self::schedule_frame(&app);
        Ok(app)
    }

    fn spawn_backend(this: &Rc<RefCell<Self>>, canvas: HtmlCanvasElement, width: u32, height: u32) {
        let weak = Rc::downgrade(this);
        spawn_local(async move {
            let result = init_backend(canvas, width, height).await;
            let Some(this) = weak.upgrade() else { return };
            let mut app = this.borrow_mut();
            match result {
                Ok(backend) => app.backend = Some(backend),
                Err(err) => {
                    tracing::error!(error = %err, "render backend unavailable");
                    app.show_status(&Status::Error(err.to_string()));
                    app.viewer.stop();
                }
            }
        });
    }

    fn spawn_load(this: &Rc<RefCell<Self>>) {
        let Some(_format) = this.borrow_mut().viewer.begin_load() else {
            this.borrow_mut().flush_status();
            return;
        };
        let url = this.borrow().viewer.config().model_path.clone();
        let weak = Rc::downgrade(this);
        // Not cancelled on teardown; a late completion finds no app and returns.
        spawn_local(async move {
            let progress_target = weak.clone();
            let result = fetch_model(&url, move |progress| {
                if let Some(this) = progress_target.upgrade() {
                    let mut app = this.borrow_mut();
                    app.viewer.on_progress(progress);
                    app.flush_status();
                }
            })
            .await;

            let Some(this) = weak.upgrade() else { return };
            let mut app = this.borrow_mut();
            match result {
                Ok((bytes, resources)) => {
                    app.viewer.finish_load(&bytes, &resources);
                }
                Err(err) => app.viewer.fail_load(err),
            }
            app.flush_status();
        });
    }

    fn schedule_frame(this: &Rc<RefCell<Self>>) {
        if !this.borrow().viewer.is_running() {
            return;
        }
        let weak = Rc::downgrade(this);
        let handle = request_animation_frame(move |timestamp_ms| {
            let Some(this) = weak.upgrade() else { return };
            {
                let mut app = this.borrow_mut();
                app.pending_frame = None;
                app.render(Time::from_millis(timestamp_ms));
            }
            Self::schedule_frame(&this);
        });
        this.borrow_mut().pending_frame = Some(handle);
    }

    fn render(&mut self, now: Time) {
        let Self { viewer, backend, .. } = self;
        // Until the backend exists there is nothing to present.
        if let Some(backend) = backend.as_mut() {
            viewer.step_at(now, backend);
        }
    }

    pub fn start(this: &Rc<RefCell<Self>>) {
        if this.borrow_mut().viewer.start() {
            tracing::info!("render loop started");
            Self::schedule_frame(this);
        }
    }

    pub fn stop(&mut self) {
        if self.viewer.stop() {
            // Dropping the handle cancels the queued frame.
            self.pending_frame = None;
            tracing::info!(frames = self.viewer.frames_run(), "render loop stopped");
        }
    }

    /// Forward document scroll progress; returns the applied canvas opacity.
    pub fn set_scroll_progress(&mut self, progress: f64) -> f64 {
        let opacity = self.viewer.set_scroll_progress(progress);
        dom::set_style(&self.canvas, "opacity", &opacity.to_string());
        opacity
    }

    fn resize(&mut self) {
        let viewport = current_viewport(&self.window);
        let (width, height) = viewport.physical_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.viewer.resize(viewport);
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(width, height);
        }
    }

    fn install_listeners(this: &Rc<RefCell<Self>>) {
        let (window, canvas) = {
            let app = this.borrow();
            (app.window.clone(), app.canvas.clone())
        };
        let mut listeners = Vec::new();

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new(&window, "resize", move |_| {
            if let Some(this) = weak.upgrade() {
                this.borrow_mut().resize();
            }
        }));

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new(&canvas, "pointerdown", move |event| {
            let (Some(this), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            this.borrow_mut()
                .viewer
                .pointer_down(mouse.client_x() as f64, mouse.client_y() as f64);
        }));

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new(&window, "pointermove", move |event| {
            let (Some(this), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            this.borrow_mut()
                .viewer
                .pointer_move(mouse.client_x() as f64, mouse.client_y() as f64);
        }));

        for kind in ["pointerup", "pointercancel"] {
            let weak = Rc::downgrade(this);
            listeners.push(EventListener::new(&window, kind, move |_| {
                if let Some(this) = weak.upgrade() {
                    this.borrow_mut().viewer.pointer_up();
                }
            }));
        }

        this.borrow_mut().listeners = listeners;
    }

    fn flush_status(&mut self) {
        for status in self.viewer.drain_status() {
            self.show_status(&status);
        }
    }

    fn show_status(&mut self, status: &Status) {
        let message = status.message();
        tracing::debug!(status = %message);
        let Some(el) = self.status.clone() else { return };
        el.set_text_content(Some(&message));
        let _ = el.style().set_property("display", "block");

        self.hide_timer = status
            .hide_after_ms(&self.viewer.config().status_hide_ms)
            .map(|ms| {
                Timeout::new(ms, move || {
                    let _ = el.style().set_property("display", "none");
                })
            });
    }
}

/// Fetch the model and every sibling file it references. Progress covers the
/// model file itself.
async fn fetch_model(
    url: &str,
    on_progress: impl FnMut(LoadProgress),
) -> Result<(Vec<u8>, ExternalResources), ModelLoadError> {
    let bytes = fetch_with_progress(url, on_progress).await?;
    let mut resources = ExternalResources::new();
    for resource in external_resources(url, &bytes)? {
        tracing::debug!(uri = %resource.uri, url = %resource.url, "fetching model resource");
        let data = fetch_with_progress(&resource.url, |_| {}).await?;
        resources.insert(resource.uri, data);
    }
    Ok((bytes, resources))
}

/// GET `url` as bytes, reporting byte progress while the body streams in.
async fn fetch_with_progress(
    url: &str,
    mut on_progress: impl FnMut(LoadProgress),
) -> Result<Vec<u8>, ModelLoadError> {
    let transfer = |message: String| ModelLoadError::Transfer {
        url: url.to_string(),
        message,
    };

    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| transfer(e.to_string()))?;
    if !response.ok() {
        return Err(ModelLoadError::HttpStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let total = response
        .headers()
        .get("content-length")
        .and_then(|v| v.trim().parse::<u64>().ok());

    let Some(body) = response.body() else {
        let bytes = response.binary().await.map_err(|e| transfer(e.to_string()))?;
        on_progress(LoadProgress::new(bytes.len() as u64, total));
        return Ok(bytes);
    };

    let reader: web_sys::ReadableStreamDefaultReader = body.get_reader().unchecked_into();
    let mut bytes = Vec::with_capacity(total.unwrap_or(0) as usize);
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| transfer(format!("{e:?}")))?;
        let done = js_sys::Reflect::get(&chunk, &"done".into())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }
        let value = js_sys::Reflect::get(&chunk, &"value".into())
            .map_err(|e| transfer(format!("{e:?}")))?;
        bytes.extend(js_sys::Uint8Array::new(&value).to_vec());
        on_progress(LoadProgress::new(bytes.len() as u64, total));
    }
    tracing::debug!(url, bytes = bytes.len(), "model transfer complete");
    Ok(bytes)
}
