use crate::gfx::rendering::FrameData;

/// Environment the visualization is mounted into.
///
/// The host owns the platform side of every resource the lifecycle guard
/// acquires: it creates and releases render surfaces inside a container,
/// attaches interaction controls to a surface, and draws frames.
pub trait RenderHost {
    /// Mount point a surface is created in
    type Container: ?Sized;
    /// A live render surface
    type Surface;

    /// Whether the graphics backend can be used at all
    fn graphics_available(&mut self) -> bool;

    /// Presence check, fails with a reason when `container` cannot take a surface
    fn check_container(&self, container: &Self::Container) -> Result<(), String>;

    fn create_surface(&mut self, container: &Self::Container) -> anyhow::Result<Self::Surface>;

    /// Current drawable size in physical pixels
    fn surface_size(&self, surface: &Self::Surface) -> (u32, u32);

    fn attach_controls(&mut self, surface: &Self::Surface) -> anyhow::Result<()>;

    fn detach_controls(&mut self, surface: &Self::Surface);

    fn resize_surface(&mut self, surface: &mut Self::Surface, width: u32, height: u32);

    fn render(&mut self, surface: &mut Self::Surface, frame: &FrameData<'_>) -> anyhow::Result<()>;

    /// Destroys the surface and frees its container
    fn release_surface(&mut self, surface: Self::Surface);
}

/// Where loading, ready and failure messages are shown to the user
pub trait StatusSink {
    fn show_loading(&mut self);

    /// Clears the loading indicator once the scene is up
    fn show_ready(&mut self);

    fn show_error(&mut self, message: &str);
}
