use std::fmt;

use crate::config::CameraConfig;
use crate::error::{Error, Result};
use crate::gfx::camera::CameraManager;

use super::animation::AnimationLoop;
use super::host::RenderHost;
use super::state::LifecycleState;
use super::subscription::{EventRegistry, HostEvent, Subscription};

/// Token for one active instance.
///
/// The id is fresh on every successful [`LifecycleGuard::initialize`]; a
/// handle from an earlier instance no longer disposes anything.
#[derive(Debug, Clone)]
pub struct Handle {
    id: u64,
    animation: AnimationLoop,
}

impl Handle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Handle {}

struct Instance<S> {
    handle: Handle,
    surface: S,
    controls: CameraManager,
    subscriptions: Vec<Subscription>,
}

/// Ensures at most one live instance per guard and tears it down cleanly.
///
/// Resources are acquired in a fixed order (render surface, controls,
/// event subscriptions, animation token) and released in reverse, both on
/// dispose and when a setup step fails halfway.
pub struct LifecycleGuard<H: RenderHost> {
    host: H,
    state: LifecycleState,
    instance: Option<Instance<H::Surface>>,
    events: EventRegistry,
    camera: CameraConfig,
    next_id: u64,
}

impl<H: RenderHost> LifecycleGuard<H> {
    pub fn new(host: H, camera: CameraConfig) -> Self {
        Self {
            host,
            state: LifecycleState::Uninitialized,
            instance: None,
            events: EventRegistry::new(),
            camera,
            next_id: 0,
        }
    }

    pub fn initialize(&mut self, container: Option<&H::Container>) -> Result<Handle> {
        if self.state.is_active() {
            log::debug!("initialize rejected, guard is {}", self.state);
            return Err(Error::AlreadyInitialized);
        }
        if !self.host.graphics_available() {
            return Err(Error::DependencyMissing(
                "no compatible graphics adapter found".to_owned(),
            ));
        }
        let container = container.ok_or_else(|| {
            Error::ContainerUnavailable("no container to host the render surface".to_owned())
        })?;
        self.host
            .check_container(container)
            .map_err(Error::ContainerUnavailable)?;

        self.transition(LifecycleState::Initializing);
        match self.acquire(container) {
            Ok(instance) => {
                let handle = instance.handle.clone();
                self.instance = Some(instance);
                self.transition(LifecycleState::Ready);
                log::info!("Instance {} ready", handle.id);
                Ok(handle)
            }
            Err(e) => {
                self.transition(LifecycleState::Uninitialized);
                log::warn!("Setup failed, rolled back: {e}");
                Err(e)
            }
        }
    }

    /// Acquires every resource of a new instance, releasing the ones already
    /// held if a later step fails
    fn acquire(&mut self, container: &H::Container) -> Result<Instance<H::Surface>> {
        let surface = self.host.create_surface(container)?;

        if let Err(e) = self.host.attach_controls(&surface) {
            self.host.release_surface(surface);
            return Err(e.into());
        }

        let (width, height) = self.host.surface_size(&surface);
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        let controls = CameraManager::from_config(&self.camera, aspect);

        let subscriptions = vec![
            self.events.subscribe(HostEvent::Resize),
            self.events.subscribe(HostEvent::Unload),
        ];

        self.next_id += 1;
        Ok(Instance {
            handle: Handle {
                id: self.next_id,
                animation: AnimationLoop::start(),
            },
            surface,
            controls,
            subscriptions,
        })
    }

    /// Releases the instance `handle` belongs to.
    ///
    /// A no-op (returning false) unless the guard is ready and `handle` is
    /// the active one.
    pub fn dispose(&mut self, handle: &Handle) -> bool {
        if self.state != LifecycleState::Ready {
            log::debug!("dispose ignored, guard is {}", self.state);
            return false;
        }
        let Some(instance) = self.instance.take_if(|i| i.handle == *handle) else {
            log::debug!("dispose ignored, handle {} is stale", handle.id);
            return false;
        };

        self.transition(LifecycleState::Disposed);
        let Instance {
            handle,
            surface,
            controls: _,
            subscriptions,
        } = instance;

        handle.animation.cancel();
        for subscription in subscriptions {
            self.events.unsubscribe(subscription);
        }
        self.host.detach_controls(&surface);
        self.host.release_surface(surface);

        self.transition(LifecycleState::Uninitialized);
        log::info!("Instance {} disposed", handle.id);
        true
    }

    fn transition(&mut self, next: LifecycleState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        log::debug!("lifecycle {} -> {}", self.state, next);
        self.state = next;
    }

    pub fn is_ready(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn handle(&self) -> Option<&Handle> {
        self.instance.as_ref().map(|i| &i.handle)
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn controls(&self) -> Option<&CameraManager> {
        self.instance.as_ref().map(|i| &i.controls)
    }

    pub fn controls_mut(&mut self) -> Option<&mut CameraManager> {
        self.instance.as_mut().map(|i| &mut i.controls)
    }

    /// Resizes the live surface and the camera projection
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.events.is_subscribed(HostEvent::Resize) {
            return;
        }
        if let Some(instance) = self.instance.as_mut() {
            self.host.resize_surface(&mut instance.surface, width, height);
            instance.controls.camera.resize_projection(width, height);
        }
    }

    /// Runs `f` with the host, the live surface and its controls
    pub fn with_surface<T>(
        &mut self,
        f: impl FnOnce(&mut H, &mut H::Surface, &mut CameraManager) -> T,
    ) -> Option<T> {
        let instance = self.instance.as_mut()?;
        Some(f(&mut self.host, &mut instance.surface, &mut instance.controls))
    }
}

impl<H: RenderHost> fmt::Debug for LifecycleGuard<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleGuard")
            .field("state", &self.state)
            .field("handle", &self.handle().map(Handle::id))
            .field("listeners", &self.events.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::test_host::MockHost;

    fn guard() -> LifecycleGuard<MockHost> {
        LifecycleGuard::new(MockHost::new(), CameraConfig::default())
    }

    #[test]
    fn test_initialize_then_reject_then_dispose() {
        let mut guard = guard();
        assert_eq!(guard.state(), LifecycleState::Uninitialized);

        let handle = guard.initialize(Some("scene")).unwrap();
        assert!(guard.is_ready());

        let second = guard.initialize(Some("scene"));
        assert!(matches!(second, Err(Error::AlreadyInitialized)));
        assert!(guard.is_ready());

        assert!(guard.dispose(&handle));
        assert_eq!(guard.state(), LifecycleState::Uninitialized);
    }

    #[test]
    fn test_double_initialize_acquires_nothing() {
        let mut guard = guard();
        let _handle = guard.initialize(Some("scene")).unwrap();
        let surfaces = guard.host().live_surfaces;
        let controls = guard.host().attached_controls;
        let listeners = guard.events().listener_count();

        assert!(guard.initialize(Some("other")).is_err());
        assert_eq!(guard.host().live_surfaces, surfaces);
        assert_eq!(guard.host().attached_controls, controls);
        assert_eq!(guard.events().listener_count(), listeners);
        assert_eq!(guard.host().surfaces_created, 1);
    }

    #[test]
    fn test_dispose_when_uninitialized_is_noop() {
        let mut guard = guard();
        let handle = guard.initialize(Some("scene")).unwrap();
        assert!(guard.dispose(&handle));

        assert!(!guard.dispose(&handle));
        assert_eq!(guard.state(), LifecycleState::Uninitialized);
        assert_eq!(guard.host().released, vec![1]);
    }

    #[test]
    fn test_reinitialize_gives_fresh_handle() {
        let mut guard = guard();
        let first = guard.initialize(Some("scene")).unwrap();
        assert!(guard.dispose(&first));

        let second = guard.initialize(Some("scene")).unwrap();
        assert_ne!(first, second);
        assert!(!first.animation().is_running());
        assert!(second.animation().is_running());

        // The stale handle cannot tear down the new instance
        assert!(!guard.dispose(&first));
        assert!(guard.is_ready());
        assert_eq!(guard.host().live_surfaces, 1);
        assert_eq!(guard.host().released, vec![1]);
    }

    #[test]
    fn test_failed_attach_rolls_back_surface() {
        let mut guard = guard();
        guard.host_mut().fail_attach = true;

        let result = guard.initialize(Some("scene"));
        assert!(matches!(result, Err(Error::Setup(_))));
        assert_eq!(guard.state(), LifecycleState::Uninitialized);
        assert_eq!(guard.host().live_surfaces, 0);
        assert_eq!(guard.host().attached_controls, 0);
        assert_eq!(guard.events().listener_count(), 0);

        // Retrying after the rollback is allowed
        guard.host_mut().fail_attach = false;
        assert!(guard.initialize(Some("scene")).is_ok());
        assert_eq!(guard.host().live_surfaces, 1);
    }

    #[test]
    fn test_failed_surface_leaves_nothing_behind() {
        let mut guard = guard();
        guard.host_mut().fail_surface = true;

        assert!(matches!(guard.initialize(Some("scene")), Err(Error::Setup(_))));
        assert_eq!(guard.state(), LifecycleState::Uninitialized);
        assert_eq!(guard.host().live_surfaces, 0);
    }

    #[test]
    fn test_missing_dependency() {
        let mut guard = guard();
        guard.host_mut().graphics = false;

        let result = guard.initialize(Some("scene"));
        assert!(matches!(result, Err(Error::DependencyMissing(_))));
        assert_eq!(guard.host().surfaces_created, 0);
    }

    #[test]
    fn test_missing_or_occupied_container() {
        let mut guard = guard();
        assert!(matches!(
            guard.initialize(None),
            Err(Error::ContainerUnavailable(_))
        ));

        guard.host_mut().occupy("scene");
        assert!(matches!(
            guard.initialize(Some("scene")),
            Err(Error::ContainerUnavailable(_))
        ));
        assert_eq!(guard.state(), LifecycleState::Uninitialized);
    }

    #[test]
    fn test_dispose_unsubscribes_everything() {
        let mut guard = guard();
        let handle = guard.initialize(Some("scene")).unwrap();
        assert!(guard.events().is_subscribed(HostEvent::Resize));
        assert!(guard.events().is_subscribed(HostEvent::Unload));

        let scheduled = handle.animation().clone();
        guard.dispose(&handle);

        assert_eq!(guard.events().listener_count(), 0);
        assert_eq!(guard.host().attached_controls, 0);
        assert_eq!(scheduled.run_frame(|| ()), None);
    }

    #[test]
    fn test_resize_updates_surface_and_camera() {
        let mut guard = guard();
        let handle = guard.initialize(Some("scene")).unwrap();

        guard.resize(800, 800);
        let aspect = guard.controls().unwrap().camera.aspect;
        assert!((aspect - 1.0).abs() < 1e-6);
        let size = guard.with_surface(|_, surface, _| surface.size);
        assert_eq!(size, Some((800, 800)));

        guard.dispose(&handle);
        guard.resize(100, 50);
        assert!(guard.controls().is_none());
    }
}
