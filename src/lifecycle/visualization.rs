//! Host-facing control surface of the ethical boundary visualization.

use winit::event::{DeviceEvent, ElementState, MouseButton};

use crate::config::ManifoldConfig;
use crate::error::{Error, Result};
use crate::gfx::camera::CameraManager;
use crate::gfx::rendering::FrameData;
use crate::gfx::scene::{FrameScratch, Scene, SceneStatistics};
use crate::manifold::{Animator, ManifoldScene, SceneMetrics};

use super::guard::{Handle, LifecycleGuard};
use super::host::{RenderHost, StatusSink};
use super::subscription::HostEvent;

struct SceneContent {
    manifold: ManifoldScene,
    animator: Animator,
    scratch: FrameScratch,
}

/// Owns the lifecycle guard, the scene and the status reporting.
///
/// The host calls [`init`](Self::init) once its container exists,
/// [`frame`](Self::frame) once per display refresh, [`on_resize`](Self::on_resize)
/// on size changes and [`cleanup`](Self::cleanup) on teardown.
pub struct Visualization<H: RenderHost, S: StatusSink> {
    config: ManifoldConfig,
    guard: LifecycleGuard<H>,
    status: S,
    handle: Option<Handle>,
    content: Option<SceneContent>,
    metrics: Option<SceneMetrics>,
}

impl<H: RenderHost, S: StatusSink> Visualization<H, S> {
    pub fn new(host: H, status: S, config: ManifoldConfig) -> Self {
        let guard = LifecycleGuard::new(host, config.camera);
        Self {
            config,
            guard,
            status,
            handle: None,
            content: None,
            metrics: None,
        }
    }

    /// Initializes the visualization, reporting any failure on the status sink.
    ///
    /// Returns true if a new instance was started.
    pub fn init(&mut self, container: Option<&H::Container>) -> bool {
        match self.try_init(container) {
            Ok(_) => true,
            Err(Error::AlreadyInitialized) => {
                log::warn!("Visualization already initialized, ignoring init");
                false
            }
            Err(e) => {
                log::error!("Failed to initialize visualization: {e}");
                self.status.show_error(&e.to_string());
                false
            }
        }
    }

    pub fn try_init(&mut self, container: Option<&H::Container>) -> Result<Handle> {
        if !self.guard.state().is_active() {
            self.config.validate()?;
            self.status.show_loading();
        }
        let handle = self.guard.initialize(container)?;

        let manifold = match ManifoldScene::from_config(&self.config) {
            Ok(manifold) => manifold,
            Err(e) => {
                self.guard.dispose(&handle);
                return Err(e);
            }
        };
        let animator = Animator::new(&manifold.scene, &manifold.layout, &self.config.performance);

        self.metrics = self
            .guard
            .controls()
            .map(|controls| SceneMetrics::compute(&manifold.scene, &manifold.layout, &controls.camera));
        let stats = manifold.scene.get_statistics();
        log::info!(
            "Scene built: {} nodes, {} lights, {} triangles",
            stats.node_count,
            stats.light_count,
            stats.total_triangles
        );

        self.content = Some(SceneContent {
            manifold,
            animator,
            scratch: FrameScratch::new(),
        });
        self.handle = Some(handle.clone());
        self.status.show_ready();
        Ok(handle)
    }

    /// Tears the instance down; safe to call any number of times
    pub fn cleanup(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.guard.dispose(&handle);
        }
        self.content = None;
        self.metrics = None;
    }

    /// Host unload notification, honored while the unload subscription is live
    pub fn handle_unload(&mut self) {
        if self.guard.events().is_subscribed(HostEvent::Unload) {
            log::info!("Host unloading, cleaning up");
            self.cleanup();
        }
    }

    /// `width` and `height` are physical pixels
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.guard.resize(width, height);
    }

    pub fn is_initialized(&self) -> bool {
        self.guard.is_ready()
    }

    /// Advances the animation and draws one frame.
    ///
    /// Does nothing once the animation loop of the current handle has been
    /// cancelled. Returns true if a frame was submitted.
    pub fn frame(&mut self, delta_time: f32) -> bool {
        let Some(animation) = self.handle.as_ref().map(|h| h.animation().clone()) else {
            return false;
        };
        let Some(content) = self.content.as_mut() else {
            return false;
        };
        let guard = &mut self.guard;
        let metrics = &mut self.metrics;

        let result = animation.run_frame(|| {
            let SceneContent {
                manifold,
                animator,
                scratch,
            } = content;
            animator.update(&mut manifold.scene, &manifold.layout, delta_time);

            guard.with_surface(|host, surface, controls| {
                if controls.update() {
                    let updated =
                        SceneMetrics::compute(&manifold.scene, &manifold.layout, &controls.camera);
                    log::debug!("{updated}");
                    *metrics = Some(updated);
                }
                let frame = FrameData::prepare(&manifold.scene, &controls.camera, scratch);
                host.render(surface, &frame)
            })
        });

        match result {
            Some(Some(Ok(()))) => true,
            Some(Some(Err(e))) => {
                log::error!("Render failed: {e:#}");
                false
            }
            _ => false,
        }
    }

    /// Forwards raw mouse motion and wheel input to the camera controls
    pub fn process_device_event(&mut self, event: &DeviceEvent) -> bool {
        match self.guard.controls_mut() {
            Some(CameraManager { camera, controller }) => controller.process_events(event, camera),
            None => false,
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if let Some(controls) = self.guard.controls_mut() {
            controls.controller.process_mouse_button(button, state);
        }
    }

    pub fn metrics(&self) -> Option<&SceneMetrics> {
        self.metrics.as_ref()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.content.as_ref().map(|c| &c.manifold.scene)
    }

    pub fn statistics(&self) -> Option<SceneStatistics> {
        self.scene().map(Scene::get_statistics)
    }

    pub fn elapsed(&self) -> f32 {
        self.content.as_ref().map_or(0.0, |c| c.animator.elapsed())
    }

    pub fn config(&self) -> &ManifoldConfig {
        &self.config
    }

    pub fn guard(&self) -> &LifecycleGuard<H> {
        &self.guard
    }

    pub fn guard_mut(&mut self) -> &mut LifecycleGuard<H> {
        &mut self.guard
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut S {
        &mut self.status
    }
}
