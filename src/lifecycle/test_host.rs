//! In-memory host used by the lifecycle tests

use std::collections::HashSet;

use anyhow::bail;

use crate::gfx::rendering::FrameData;

use super::host::{RenderHost, StatusSink};

#[derive(Debug)]
pub struct MockSurface {
    pub id: u32,
    pub container: String,
    pub size: (u32, u32),
}

#[derive(Debug)]
pub struct MockHost {
    pub graphics: bool,
    pub fail_attach: bool,
    pub fail_surface: bool,
    pub live_surfaces: usize,
    pub attached_controls: usize,
    pub surfaces_created: u32,
    pub frames_rendered: usize,
    pub released: Vec<u32>,
    occupied: HashSet<String>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            graphics: true,
            fail_attach: false,
            fail_surface: false,
            live_surfaces: 0,
            attached_controls: 0,
            surfaces_created: 0,
            frames_rendered: 0,
            released: Vec::new(),
            occupied: HashSet::new(),
        }
    }

    pub fn occupy(&mut self, container: &str) {
        self.occupied.insert(container.to_owned());
    }
}

impl RenderHost for MockHost {
    type Container = str;
    type Surface = MockSurface;

    fn graphics_available(&mut self) -> bool {
        self.graphics
    }

    fn check_container(&self, container: &str) -> Result<(), String> {
        if self.occupied.contains(container) {
            return Err(format!("'{container}' already hosts a render surface"));
        }
        Ok(())
    }

    fn create_surface(&mut self, container: &str) -> anyhow::Result<MockSurface> {
        if self.fail_surface {
            bail!("surface creation failed");
        }
        self.surfaces_created += 1;
        self.live_surfaces += 1;
        self.occupied.insert(container.to_owned());
        Ok(MockSurface {
            id: self.surfaces_created,
            container: container.to_owned(),
            size: (1200, 800),
        })
    }

    fn surface_size(&self, surface: &MockSurface) -> (u32, u32) {
        surface.size
    }

    fn attach_controls(&mut self, _surface: &MockSurface) -> anyhow::Result<()> {
        if self.fail_attach {
            bail!("controls refused to attach");
        }
        self.attached_controls += 1;
        Ok(())
    }

    fn detach_controls(&mut self, _surface: &MockSurface) {
        self.attached_controls -= 1;
    }

    fn resize_surface(&mut self, surface: &mut MockSurface, width: u32, height: u32) {
        surface.size = (width, height);
    }

    fn render(&mut self, _surface: &mut MockSurface, frame: &FrameData<'_>) -> anyhow::Result<()> {
        assert!(!frame.geometry.is_empty());
        self.frames_rendered += 1;
        Ok(())
    }

    fn release_surface(&mut self, surface: MockSurface) {
        self.live_surfaces -= 1;
        self.occupied.remove(&surface.container);
        self.released.push(surface.id);
    }
}

#[derive(Debug, Default)]
pub struct RecordingStatus {
    pub messages: Vec<String>,
}

impl StatusSink for RecordingStatus {
    fn show_loading(&mut self) {
        self.messages.push("loading".to_owned());
    }

    fn show_ready(&mut self) {
        self.messages.push("ready".to_owned());
    }

    fn show_error(&mut self, message: &str) {
        self.messages.push(format!("error: {message}"));
    }
}
