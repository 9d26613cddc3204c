//! Model viewer orchestration.
//!
//! `ModelViewer` owns the scene, camera and controls and turns load results,
//! scroll progress and animation frames into `RenderFrame`s for a
//! `FrameSink`. It never touches the DOM or the GPU, so every path runs
//! natively under test; the wasm app supplies the fetch and the backend.

use foundation::time::Time;
use formats::{ExternalResources, LoadProgress, ModelFormat, ModelLoadError, load_model};
use gpu::{Camera3D, MeshBatch, RenderFrame, Renderer};
use runtime::{EventBus, Frame, FrameLoop};
use scene::prefabs::fallback_model;
use scene::{Model, OrbitControls, PerspectiveCamera, World, normalize_model};

use crate::config::ViewerConfig;
use crate::scroll::ScrollPose;
use crate::status::{STATUS_EVENT, Status};
use crate::viewport::Viewport;

/// Render backend seen from the viewer.
pub trait FrameSink {
    /// Geometry changed; replace whatever was uploaded before.
    fn upload(&mut self, generation: u64, batch: &MeshBatch);
    fn render(&mut self, frame: &RenderFrame);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading(ModelFormat),
    Loaded,
    Fallback,
}

pub struct ModelViewer {
    config: ViewerConfig,
    world: World,
    camera: PerspectiveCamera,
    controls: Option<OrbitControls>,
    viewport: Viewport,
    pose: ScrollPose,
    load_state: LoadState,
    status: EventBus<Status>,
    last_progress: Option<String>,
    frame_loop: FrameLoop,
    uploaded: Option<u64>,
}

impl ModelViewer {
    pub fn new(config: ViewerConfig, viewport: Viewport) -> Self {
        let camera = PerspectiveCamera::looking_at_origin(config.camera_distance, viewport.aspect());
        let controls = config.controls.map(|c| {
            let mut controls = OrbitControls::new(&camera);
            controls.damping_factor = c.damping_factor;
            match c.auto_rotate_speed {
                Some(speed) => controls.with_auto_rotate(speed),
                None => controls,
            }
        });
        let world = World::with_lights(config.lights.rig());
        let pose = config.scroll.apply(0.0, config.placement.anchor());

        let mut frame_loop = FrameLoop::default();
        frame_loop.start();

        let mut viewer = Self {
            config,
            world,
            camera,
            controls,
            viewport,
            pose,
            load_state: LoadState::Idle,
            status: EventBus::new(),
            last_progress: None,
            frame_loop,
            uploaded: None,
        };
        viewer.report(Status::Initializing);
        tracing::info!(
            model = %viewer.config.model_path,
            controls = viewer.controls.is_some(),
            lights = viewer.world.lights().len(),
            "viewer initialized"
        );
        viewer
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn scroll_pose(&self) -> ScrollPose {
        self.pose
    }

    pub fn opacity(&self) -> f64 {
        self.pose.opacity
    }

    /// Statuses reported since the last drain, oldest first.
    pub fn drain_status(&mut self) -> Vec<Status> {
        self.status.drain().into_iter().map(|e| e.payload).collect()
    }

    /// Resolve the configured path to a format. Unsupported paths switch to
    /// the fallback immediately and return `None`; there is nothing to fetch.
    pub fn begin_load(&mut self) -> Option<ModelFormat> {
        match ModelFormat::from_path(&self.config.model_path) {
            Ok(format) => {
                self.load_state = LoadState::Loading(format);
                self.last_progress = None;
                tracing::info!(path = %self.config.model_path, format = format.name(), "loading model");
                Some(format)
            }
            Err(err) => {
                self.fail_load(err);
                None
            }
        }
    }

    /// Reports a progress line only when the shown percentage changes.
    pub fn on_progress(&mut self, progress: LoadProgress) {
        let Some(line) = progress.status_line() else {
            return;
        };
        if self.last_progress.as_deref() == Some(line.as_str()) {
            return;
        }
        self.last_progress = Some(line.clone());
        self.report(Status::Progress(line));
    }

    /// Parse, normalize and attach fetched bytes plus any sibling files they
    /// reference. Any failure attaches the fallback instead. Returns the
    /// resulting state.
    pub fn finish_load(&mut self, bytes: &[u8], resources: &ExternalResources) -> LoadState {
        match self.parse_and_normalize(bytes, resources) {
            Ok(model) => {
                self.attach(model);
                self.load_state = LoadState::Loaded;
                self.report(Status::Loaded);
                LoadState::Loaded
            }
            Err(err) => {
                self.fail_load(err);
                LoadState::Fallback
            }
        }
    }

    /// Attach the fallback after any failed load. No retry.
    pub fn fail_load(&mut self, err: ModelLoadError) {
        tracing::warn!(path = %self.config.model_path, error = %err, "model load failed, using fallback");
        let mut model = fallback_model(self.config.fallback_radius);
        model.transform.position = self.config.placement.anchor();
        self.attach(model);
        self.load_state = LoadState::Fallback;
        self.report(Status::Fallback(err.to_string()));
    }

    fn parse_and_normalize(
        &self,
        bytes: &[u8],
        resources: &ExternalResources,
    ) -> Result<Model, ModelLoadError> {
        let mut model = load_model(&self.config.model_path, bytes, resources)?;
        let scale = normalize_model(&mut model, self.config.target_size, self.config.placement)?;
        tracing::debug!(scale, vertices = model.vertex_count(), "model normalized");
        Ok(model)
    }

    fn attach(&mut self, model: Model) {
        if self.world.attach_model(model).is_some() {
            tracing::debug!("replaced previously attached model");
        }
        self.apply_pose();
    }

    /// Clamp `progress`, update the model pose, and return the canvas opacity.
    pub fn set_scroll_progress(&mut self, progress: f64) -> f64 {
        self.pose = self.config.scroll.apply(progress, self.config.placement.anchor());
        self.apply_pose();
        self.pose.opacity
    }

    fn apply_pose(&mut self) {
        let pose = self.pose;
        if let Some(model) = self.world.model_mut() {
            model.transform.rotation = pose.rotation;
            model.transform.position = pose.position;
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_viewport(viewport.width, viewport.height);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if let Some(controls) = self.controls.as_mut() {
            controls.pointer_down(x, y);
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let height = self.viewport.height;
        if let Some(controls) = self.controls.as_mut() {
            controls.pointer_move(x, y, height);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(controls) = self.controls.as_mut() {
            controls.pointer_up();
        }
    }

    pub fn start(&mut self) -> bool {
        self.frame_loop.start()
    }

    pub fn stop(&mut self) -> bool {
        self.frame_loop.stop()
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn frames_run(&self) -> u64 {
        self.frame_loop.frames_run()
    }

    /// One fixed-step frame. `false` when the loop is stopped.
    pub fn step(&mut self, sink: &mut dyn FrameSink) -> bool {
        match self.frame_loop.step() {
            Some(frame) => {
                self.tick(frame, sink);
                true
            }
            None => false,
        }
    }

    /// One frame at an animation-frame timestamp.
    pub fn step_at(&mut self, now: Time, sink: &mut dyn FrameSink) -> bool {
        match self.frame_loop.step_at(now) {
            Some(frame) => {
                self.tick(frame, sink);
                true
            }
            None => false,
        }
    }

    /// Advance controls, upload changed geometry and render.
    pub fn tick(&mut self, _frame: Frame, sink: &mut dyn FrameSink) {
        if let Some(controls) = self.controls.as_mut() {
            controls.update(&mut self.camera);
        }

        let generation = self.world.generation();
        if self.world.has_model() && self.uploaded != Some(generation) {
            if let Some(model) = self.world.model() {
                sink.upload(generation, &MeshBatch::from_model(model));
                self.uploaded = Some(generation);
            }
        }

        let frame = Renderer::collect(
            &self.world,
            Camera3D::from_perspective(&self.camera),
            self.pose.opacity as f32,
        );
        sink.render(&frame);
    }

    fn report(&mut self, status: Status) {
        let frame = Frame::new(self.frame_loop.frames_run(), 0.0);
        self.status.emit(frame, STATUS_EVENT, status);
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameSink, LoadState, ModelViewer};
    use crate::config::ViewerConfig;
    use crate::status::Status;
    use crate::viewport::Viewport;
    use approx::assert_abs_diff_eq;
    use formats::{ExternalResources, LoadProgress, ModelLoadError};
    use foundation::math::Vec3;
    use gpu::{MeshBatch, RenderFrame};
    use pretty_assertions::assert_eq;
    use scene::ModelSource;

    #[derive(Default)]
    struct RecordingSink {
        uploads: Vec<(u64, usize)>,
        frames: Vec<RenderFrame>,
    }

    impl FrameSink for RecordingSink {
        fn upload(&mut self, generation: u64, batch: &MeshBatch) {
            self.uploads.push((generation, batch.vertices.len()));
        }

        fn render(&mut self, frame: &RenderFrame) {
            self.frames.push(frame.clone());
        }
    }

    const CUBE_OBJ: &str = "\
v 0 0 0
v 4 0 0
v 4 2 0
v 0 2 0
v 0 0 1
v 4 0 1
v 4 2 1
v 0 2 1
f 1 2 3 4
f 5 6 7 8
f 1 2 6 5
";

    fn viewer(config: ViewerConfig) -> ModelViewer {
        ModelViewer::new(config, Viewport::new(800.0, 600.0, 1.0))
    }

    fn no_resources() -> ExternalResources {
        ExternalResources::new()
    }

    fn obj_config() -> ViewerConfig {
        ViewerConfig {
            model_path: "assets/box.obj".to_string(),
            ..ViewerConfig::standard()
        }
    }

    #[test]
    fn init_reports_status_and_attaches_lights() {
        let mut v = viewer(ViewerConfig::standard());
        assert_eq!(v.drain_status(), vec![Status::Initializing]);
        assert_eq!(v.world().lights().len(), 3);
        assert!(!v.world().has_model());
        assert!(v.controls().is_some());
        assert_eq!(v.camera().position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn load_error_attaches_fallback_without_panicking() {
        let mut v = viewer(ViewerConfig::standard());
        assert!(v.begin_load().is_some());
        v.fail_load(ModelLoadError::HttpStatus {
            url: "assets/model.glb".into(),
            status: 404,
        });

        assert_eq!(v.load_state(), LoadState::Fallback);
        let model = v.world().model().unwrap();
        assert_eq!(model.source, ModelSource::Fallback);
        assert_eq!(model.vertex_count(), 42);
        let last = v.drain_status().pop().unwrap();
        assert!(matches!(last, Status::Fallback(_)));
    }

    #[test]
    fn unsupported_extension_falls_back_without_fetch() {
        let mut v = viewer(ViewerConfig {
            model_path: "assets/model.fbx".into(),
            ..ViewerConfig::standard()
        });
        assert_eq!(v.begin_load(), None);
        assert!(v.world().model().unwrap().is_fallback());
    }

    #[test]
    fn corrupt_bytes_fall_back() {
        let mut v = viewer(obj_config());
        v.begin_load();
        assert_eq!(v.finish_load(b"f 1 2 3\n", &no_resources()), LoadState::Fallback);
        assert!(v.world().model().unwrap().is_fallback());
    }

    #[test]
    fn loaded_model_is_normalized_to_target_size() {
        let mut v = viewer(obj_config());
        v.begin_load();
        v.on_progress(LoadProgress::new(50, Some(200)));
        assert_eq!(v.finish_load(CUBE_OBJ.as_bytes(), &no_resources()), LoadState::Loaded);

        let model = v.world().model().unwrap();
        assert_abs_diff_eq!(model.transform.scale.x * 4.0, 2.0, epsilon = 1e-9);
        let center = model.transform.apply(Vec3::new(2.0, 1.0, 0.5));
        assert_abs_diff_eq!(center.length(), 0.0, epsilon = 1e-9);

        let statuses: Vec<String> = v.drain_status().iter().map(Status::message).collect();
        assert_eq!(
            statuses,
            vec![
                "Initializing 3D viewer...".to_string(),
                "Loading model: 25%".to_string(),
                "✓ Model loaded successfully!".to_string(),
            ]
        );
        assert!(v.drain_status().is_empty());
    }

    #[test]
    fn hero_fallback_sits_at_offset_and_lifts() {
        let mut v = viewer(ViewerConfig::hero_composition());
        v.fail_load(ModelLoadError::Transfer {
            url: "assets/model.glb".into(),
            message: "offline".into(),
        });
        assert_eq!(
            v.world().model().unwrap().transform.position,
            Vec3::new(-1.4, -5.9, 4.0)
        );

        let opacity = v.set_scroll_progress(0.5);
        assert_eq!(opacity, 0.0);
        let pos = v.world().model().unwrap().transform.position;
        assert_abs_diff_eq!(pos.y, -0.9, epsilon = 1e-9);
    }

    #[test]
    fn scroll_before_load_applies_on_attach() {
        let mut v = viewer(obj_config());
        assert_abs_diff_eq!(v.set_scroll_progress(0.1), 0.8, epsilon = 1e-12);
        v.finish_load(CUBE_OBJ.as_bytes(), &no_resources());
        let rot = v.world().model().unwrap().transform.rotation;
        assert_abs_diff_eq!(rot.x, 0.03, epsilon = 1e-12);
        assert_abs_diff_eq!(rot.y, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn bounded_frames_upload_once_and_render_each() {
        let mut v = viewer(ViewerConfig::standard());
        v.fail_load(ModelLoadError::UnsupportedFormat {
            extension: "fbx".into(),
        });
        let mut sink = RecordingSink::default();
        for _ in 0..5 {
            assert!(v.step(&mut sink));
        }
        assert_eq!(sink.uploads.len(), 1);
        assert_eq!(sink.frames.len(), 5);
        assert_eq!(v.frames_run(), 5);

        // Auto-rotate moves the camera around the model.
        assert!(v.camera().position.x.abs() > 0.0);

        assert!(v.stop());
        assert!(!v.step(&mut sink));
        assert_eq!(sink.frames.len(), 5);
        assert!(v.start());
        assert!(v.step(&mut sink));
    }

    #[test]
    fn reload_uploads_new_generation() {
        let mut v = viewer(obj_config());
        let mut sink = RecordingSink::default();
        v.fail_load(ModelLoadError::Transfer {
            url: "x".into(),
            message: "timeout".into(),
        });
        v.step(&mut sink);
        v.finish_load(CUBE_OBJ.as_bytes(), &no_resources());
        v.step(&mut sink);
        assert_eq!(sink.uploads.len(), 2);
        assert_ne!(sink.uploads[0].0, sink.uploads[1].0);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut v = viewer(ViewerConfig::hero_composition());
        v.resize(Viewport::new(1000.0, 500.0, 2.5));
        assert_abs_diff_eq!(v.camera().aspect, 2.0, epsilon = 1e-12);
        assert_eq!(v.viewport().pixel_ratio(), 2.0);
        assert!(v.controls().is_none());
    }

    #[test]
    fn repeated_progress_percentage_is_reported_once() {
        let mut v = viewer(obj_config());
        v.begin_load();
        v.drain_status();
        v.on_progress(LoadProgress::new(100, Some(1000)));
        v.on_progress(LoadProgress::new(105, Some(1000)));
        v.on_progress(LoadProgress::new(10, None));
        v.on_progress(LoadProgress::new(200, Some(1000)));
        assert_eq!(
            v.drain_status(),
            vec![
                Status::Progress("Loading model: 10%".to_string()),
                Status::Progress("Loading model: 20%".to_string()),
            ]
        );
    }

    #[test]
    fn separate_gltf_loads_with_fetched_buffer() {
        const SPLIT_GLTF: &str = r#"{
            "asset": {"version": "2.0"},
            "scenes": [{"nodes": [0]}],
            "nodes": [{"mesh": 0}],
            "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
            "buffers": [{"byteLength": 36, "uri": "scene.bin"}],
            "bufferViews": [{"buffer": 0, "byteLength": 36}],
            "accessors": [{
                "bufferView": 0,
                "componentType": 5126,
                "count": 3,
                "type": "VEC3",
                "min": [0.0, 0.0, 0.0],
                "max": [1.0, 1.0, 0.0]
            }]
        }"#;
        let config = ViewerConfig {
            model_path: "assets/scene.gltf".to_string(),
            ..ViewerConfig::standard()
        };

        let mut missing = viewer(config.clone());
        missing.begin_load();
        assert_eq!(
            missing.finish_load(SPLIT_GLTF.as_bytes(), &no_resources()),
            LoadState::Fallback
        );

        let mut resources = ExternalResources::new();
        resources.insert(
            "scene.bin",
            [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
                .iter()
                .flat_map(|f| f.to_le_bytes())
                .collect(),
        );
        let mut v = viewer(config);
        v.begin_load();
        assert_eq!(v.finish_load(SPLIT_GLTF.as_bytes(), &resources), LoadState::Loaded);
        assert_eq!(v.world().model().unwrap().vertex_count(), 3);
    }
}
