use std::{collections::HashSet, sync::Arc, time::Instant};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Window, WindowAttributes, WindowId},
};

use crate::config::{ManifoldConfig, PerformanceConfig};
use crate::gfx::rendering::{FrameData, FrameOutcome, RenderEngine};
use crate::lifecycle::{RenderHost, StatusSink, Visualization};

/// Surface size for a window, with the device pixel ratio clamped
fn surface_size(window: &Window, performance: &PerformanceConfig) -> (u32, u32) {
    physical_to_surface(window.inner_size(), window.scale_factor(), performance)
}

fn physical_to_surface(
    size: PhysicalSize<u32>,
    scale_factor: f64,
    performance: &PerformanceConfig,
) -> (u32, u32) {
    let logical: LogicalSize<f64> = size.to_logical(scale_factor);
    performance.surface_size((logical.width, logical.height), scale_factor)
}

/// A window together with the renderer drawing into it
pub struct WindowSurface {
    window: Arc<Window>,
    engine: RenderEngine,
}

/// Native host: winit windows are the containers, wgpu surfaces the render
/// surfaces
pub struct WindowHost {
    performance: PerformanceConfig,
    graphics_found: bool,
    occupied: HashSet<WindowId>,
}

impl WindowHost {
    pub fn new(performance: PerformanceConfig) -> Self {
        Self {
            performance,
            graphics_found: false,
            occupied: HashSet::new(),
        }
    }
}

impl RenderHost for WindowHost {
    type Container = Arc<Window>;
    type Surface = WindowSurface;

    fn graphics_available(&mut self) -> bool {
        // Only a positive probe is cached so a later retry can succeed
        if !self.graphics_found {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
            let adapter =
                pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()));
            match adapter {
                Ok(adapter) => {
                    log::debug!("Found graphics adapter {}", adapter.get_info().name);
                    self.graphics_found = true;
                }
                Err(e) => log::warn!("No graphics adapter: {e}"),
            }
        }
        self.graphics_found
    }

    fn check_container(&self, window: &Arc<Window>) -> Result<(), String> {
        if self.occupied.contains(&window.id()) {
            return Err(format!("window {:?} already hosts a render surface", window.id()));
        }
        Ok(())
    }

    fn create_surface(&mut self, window: &Arc<Window>) -> anyhow::Result<WindowSurface> {
        let (width, height) = surface_size(window, &self.performance);
        let engine = pollster::block_on(RenderEngine::new(window.clone(), width, height))
            .context("Failed to create renderer")?;
        self.occupied.insert(window.id());
        Ok(WindowSurface {
            window: window.clone(),
            engine,
        })
    }

    fn surface_size(&self, surface: &WindowSurface) -> (u32, u32) {
        surface.engine.size()
    }

    fn attach_controls(&mut self, surface: &WindowSurface) -> anyhow::Result<()> {
        surface.window.set_cursor(CursorIcon::Grab);
        Ok(())
    }

    fn detach_controls(&mut self, surface: &WindowSurface) {
        surface.window.set_cursor(CursorIcon::Default);
    }

    fn resize_surface(&mut self, surface: &mut WindowSurface, width: u32, height: u32) {
        surface.engine.resize(width, height);
    }

    fn render(&mut self, surface: &mut WindowSurface, frame: &FrameData<'_>) -> anyhow::Result<()> {
        match surface.engine.render_frame(frame)? {
            FrameOutcome::Presented => {}
            FrameOutcome::Reconfigured | FrameOutcome::Skipped => surface.window.request_redraw(),
        }
        Ok(())
    }

    fn release_surface(&mut self, surface: WindowSurface) {
        self.occupied.remove(&surface.window.id());
        log::debug!("Released render surface of window {:?}", surface.window.id());
    }
}

/// Shows the visualization status in the window title
pub struct TitleStatus {
    title: String,
    window: Option<Arc<Window>>,
}

impl TitleStatus {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
        }
    }

    pub fn set_window(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }

    fn set_title(&self, title: &str) {
        if let Some(window) = &self.window {
            window.set_title(title);
        }
    }
}

impl StatusSink for TitleStatus {
    fn show_loading(&mut self) {
        log::info!("Loading visualization...");
        self.set_title(&format!("{} (loading...)", self.title));
    }

    fn show_ready(&mut self) {
        self.set_title(&self.title);
    }

    fn show_error(&mut self, message: &str) {
        self.set_title(&format!("{}: {message}", self.title));
    }
}

pub struct ManifoldApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ManifoldConfig,
    window: Option<Arc<Window>>,
    visualization: Visualization<WindowHost, TitleStatus>,
    last_frame: Instant,
}

impl ManifoldApp {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(ManifoldConfig::default())
    }

    pub fn with_config(config: ManifoldConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let event_loop = EventLoop::new().context("Failed to create event loop")?;

        let host = WindowHost::new(config.performance);
        let status = TitleStatus::new(config.window.title.clone());
        let visualization = Visualization::new(host, status, config.clone());

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                visualization,
                last_frame: Instant::now(),
            },
        })
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("Event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self.app_state)
            .context("Event loop terminated with an error")
    }
}

impl AppState {
    fn start(&mut self) {
        self.last_frame = Instant::now();
        self.visualization.init(self.window.as_ref());
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode) {
        match key_code {
            KeyCode::Escape => {
                self.visualization.cleanup();
                event_loop.exit();
            }
            KeyCode::KeyR => {
                log::info!("Restarting visualization");
                self.visualization.cleanup();
                self.start();
            }
            KeyCode::KeyM => {
                if let Some(metrics) = self.visualization.metrics() {
                    log::info!("{metrics}");
                }
            }
            _ => (),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                let window = Arc::new(window);
                self.visualization.status_mut().set_window(window.clone());
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {e}");
            }
        }

        // A missing window is reported by the visualization as an unavailable container
        self.start();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key_code),
            WindowEvent::MouseInput { state, button, .. } => {
                self.visualization.process_mouse_button(button, state);
            }
            WindowEvent::Resized(size) => {
                if let Some(window) = &self.window {
                    let (width, height) =
                        physical_to_surface(size, window.scale_factor(), &self.config.performance);
                    self.visualization.on_resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                self.visualization.handle_unload();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;
                self.visualization.frame(delta_time);
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        self.visualization.process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.visualization.is_initialized() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.visualization.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size_clamps_pixel_ratio() {
        let performance = PerformanceConfig::default();

        // 3x display, 400x300 logical
        let size = physical_to_surface(PhysicalSize::new(1200, 900), 3.0, &performance);
        assert_eq!(size, (800, 600));

        let size = physical_to_surface(PhysicalSize::new(1200, 800), 1.0, &performance);
        assert_eq!(size, (1200, 800));
    }
}
