use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use log::{error, info};
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event::{Event, TouchPhase as WinitTouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::animation::FrameScheduler;
use crate::input::{TouchPhase, TouchPoints};
use crate::lifecycle::{Host, Widget};
use crate::render::Renderer;
use crate::scene::Scene;

/// Desktop stand-in for the page: the window is both the container and the
/// coordinate space for pointer events.
pub struct NativeHost {
    window: Arc<Window>,
    renderer: Option<Renderer>,
}

impl NativeHost {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let renderer = block_on(Renderer::new(
            Arc::clone(&window),
            (size.width, size.height),
        ))
        .context("failed to initialize renderer")?;
        Ok(Self {
            window,
            renderer: Some(renderer),
        })
    }
}

impl FrameScheduler for NativeHost {
    type Handle = ();

    fn request_frame(&mut self) -> Result<()> {
        self.window.request_redraw();
        Ok(())
    }

    // A redraw request cannot be withdrawn; a stopped loop ignores it instead.
    fn cancel_frame(&mut self, _handle: ()) {}
}

impl Host for NativeHost {
    fn container_size(&self) -> Option<(u32, u32)> {
        let size = self.window.inner_size();
        Some((size.width, size.height))
    }

    fn window_size(&self) -> Vec2 {
        let size = self.window.inner_size();
        Vec2::new(size.width as f32, size.height as f32)
    }

    fn layout_width(&self) -> f32 {
        self.window
            .inner_size()
            .to_logical::<f32>(self.window.scale_factor())
            .width
    }

    fn attach_surface(&mut self, size: (u32, u32)) -> Result<()> {
        let renderer = self
            .renderer
            .as_mut()
            .ok_or_else(|| anyhow!("renderer already released"))?;
        renderer.resize(size);
        self.window.set_visible(true);
        Ok(())
    }

    fn resize_surface(&mut self, size: (u32, u32)) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(size);
        }
    }

    fn draw(&mut self, scene: &Scene) -> Result<()> {
        match self.renderer.as_mut() {
            Some(renderer) => renderer.draw(scene).context("failed to draw frame"),
            None => Ok(()),
        }
    }

    fn detach_surface(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.dispose();
        }
        self.window.set_visible(false);
    }
}

/// Raised when no window can be opened, so the caller can fall back to a
/// headless run.
#[derive(Debug)]
pub struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

/// Opens a transparent window and runs the widget until it is closed.
pub fn run_interactive(width: u32, height: u32) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| WindowInitError::from_error("event loop", err))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Donut View")
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_transparent(true)
            .with_visible(false)
            .build(&event_loop)
            .map_err(|err| WindowInitError::from_error("window", err))?,
    );
    let window_id = window.id();

    let host = NativeHost::new(Arc::clone(&window))?;
    let Some(mut widget) = Widget::mount(host)? else {
        return Ok(());
    };
    widget.start()?;

    let mut touches = TouchPoints::default();
    let mut last_error = None;

    event_loop
        .run(|event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);
            let Event::WindowEvent { event, window_id: id } = event else {
                return;
            };
            if id != window_id {
                return;
            }
            match event {
                WindowEvent::CloseRequested => {
                    widget.unmount();
                    elwt.exit();
                }
                WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                    widget.on_resize();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    widget.on_pointer_move(Vec2::new(position.x as f32, position.y as f32));
                }
                WindowEvent::Touch(touch) => {
                    let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                    let phase = map_touch_phase(touch.phase);
                    touches.update(touch.id, phase, position);
                    if phase == TouchPhase::Moved {
                        widget.on_touch_move(touches.first());
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Err(err) = widget.on_frame() {
                        error!("stopping after render failure: {err:#}");
                        last_error = Some(err);
                        widget.unmount();
                        elwt.exit();
                    }
                }
                _ => {}
            }
        })
        .context("event loop failed")?;

    widget.unmount();
    info!("rendered {} frame(s)", widget.frame_count());

    match last_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn map_touch_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Started,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_phases_map_one_to_one() {
        assert_eq!(map_touch_phase(WinitTouchPhase::Started), TouchPhase::Started);
        assert_eq!(map_touch_phase(WinitTouchPhase::Moved), TouchPhase::Moved);
        assert_eq!(map_touch_phase(WinitTouchPhase::Ended), TouchPhase::Ended);
        assert_eq!(
            map_touch_phase(WinitTouchPhase::Cancelled),
            TouchPhase::Cancelled
        );
    }

    #[test]
    fn window_init_error_names_the_stage() {
        let err = WindowInitError::from_error("window", "no display");
        assert_eq!(err.to_string(), "failed to initialize window: no display");
    }
}
