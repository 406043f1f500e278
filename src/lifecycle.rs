use anyhow::{Context, Result};
use glam::Vec2;
use log::{debug, info};

use crate::animation::{FrameLoop, FrameScheduler, LoopState};
use crate::input::PointerTracker;
use crate::motion::{DampedRotation, Orientation};
use crate::scene::Scene;
use crate::viewport::{aspect_ratio, ViewportProfile};

/// Platform seam for the widget: a container to draw into, a window that
/// pointer coordinates are measured against, and a frame scheduler.
pub trait Host: FrameScheduler {
    /// Size of the containing element in surface pixels, or `None` when the
    /// container does not exist yet.
    fn container_size(&self) -> Option<(u32, u32)>;

    /// Window size in the same coordinate space as pointer events.
    fn window_size(&self) -> Vec2;

    /// Width used to pick the compact or standard profile.
    fn layout_width(&self) -> f32 {
        self.window_size().x
    }

    /// Inserts the drawing surface into the container at the given size.
    fn attach_surface(&mut self, size: (u32, u32)) -> Result<()>;

    fn resize_surface(&mut self, size: (u32, u32));

    /// Submits the scene for drawing through its camera.
    fn draw(&mut self, scene: &Scene) -> Result<()>;

    /// Removes the drawing surface and releases whatever backs it.
    fn detach_surface(&mut self);
}

/// One mounted torus widget.
///
/// Mounting picks the viewport profile, assembles the scene and attaches the
/// surface; [`Widget::start`] then kicks off the frame loop. Each frame eases
/// the mesh towards the pointer target and draws it. Unmounting stops the
/// loop, ignores further input and detaches the surface.
pub struct Widget<H: Host> {
    host: H,
    profile: ViewportProfile,
    scene: Scene,
    motion: DampedRotation,
    tracker: PointerTracker,
    frames: FrameLoop<H::Handle>,
    surface_size: (u32, u32),
    mounted: bool,
}

impl<H: Host> Widget<H> {
    /// Returns `Ok(None)` without touching the host when its container is
    /// not available.
    pub fn mount(mut host: H) -> Result<Option<Self>> {
        let Some(size) = host.container_size() else {
            info!("container not available; skipping mount");
            return Ok(None);
        };

        let profile = ViewportProfile::for_width(host.layout_width());
        let scene = Scene::assemble(&profile, aspect_ratio(size));
        info!(
            "mounting {} torus ({} vertices) into {}x{} surface",
            profile.class,
            scene.mesh.geometry.vertex_count(),
            size.0,
            size.1
        );

        host.attach_surface(size).context("failed to attach drawing surface")?;

        Ok(Some(Self {
            host,
            profile,
            scene,
            motion: DampedRotation::new(),
            tracker: PointerTracker::new(),
            frames: FrameLoop::new(),
            surface_size: size,
            mounted: true,
        }))
    }

    /// Queues the first frame. When that fails the widget unmounts, so the
    /// surface never outlives a loop that cannot run.
    pub fn start(&mut self) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }
        if let Err(err) = self.frames.start(&mut self.host) {
            self.unmount();
            return Err(err.context("failed to start frame loop"));
        }
        Ok(())
    }

    /// Runs one frame: queue the next, ease towards the target, draw.
    /// Returns `false` when the loop is not running.
    pub fn on_frame(&mut self) -> Result<bool> {
        if !self.frames.tick(&mut self.host)? {
            return Ok(false);
        }
        let orientation = self.motion.step(self.tracker.target());
        self.scene.mesh.orientation = orientation;
        self.host.draw(&self.scene)?;
        Ok(true)
    }

    pub fn on_pointer_move(&self, position: Vec2) {
        if self.mounted {
            self.tracker.pointer_moved(position, self.host.window_size());
        }
    }

    pub fn on_touch_move(&self, first_touch: Option<Vec2>) {
        if self.mounted {
            self.tracker.touch_moved(first_touch, self.host.window_size());
        }
    }

    /// Follows the container size. The viewport profile chosen at mount is
    /// kept even when the new size falls in the other class.
    pub fn on_resize(&mut self) {
        if !self.mounted {
            return;
        }
        let Some(size) = self.host.container_size() else {
            return;
        };
        self.scene.camera.set_aspect(aspect_ratio(size));
        self.host.resize_surface(size);
        self.surface_size = size;
        debug!("surface resized to {}x{}", size.0, size.1);
    }

    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.frames.stop(&mut self.host);
        self.tracker.detach();
        self.host.detach_surface();
        self.mounted = false;
        info!("unmounted after {} frame(s)", self.frames.frame_count());
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn profile(&self) -> &ViewportProfile {
        &self.profile
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn rotation(&self) -> Orientation {
        self.motion.current()
    }

    pub fn target(&self) -> Orientation {
        self.tracker.target()
    }

    /// Handle for input listeners that write the target directly.
    pub fn tracker(&self) -> PointerTracker {
        self.tracker.clone()
    }

    pub fn loop_state(&self) -> LoopState {
        self.frames.state()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
