//! Headless playback of pointer traces.
//!
//! Runs the widget against an in-memory host so the easing behavior can be
//! observed without a display or GPU.

use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use glam::Vec2;

use crate::animation::FrameScheduler;
use crate::lifecycle::{Host, Widget};
use crate::motion::Orientation;
use crate::scene::Scene;
use crate::viewport::{SharedViewport, ViewportClass, ViewportProvider};

/// One recorded input event, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    Pointer(Vec2),
    Touch(Vec2),
    /// The window and its container both change to this size.
    Resize(u32, u32),
}

/// Parses a trace with one `x y`, `touch x y` or `resize w h` event per
/// line. Blank lines and lines starting with `#` are skipped.
pub fn parse_trace(contents: &str) -> Result<Vec<TraceEvent>> {
    let mut events = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = parse_event(trimmed)
            .with_context(|| format!("invalid trace event on line {}", line_no + 1))?;
        events.push(event);
    }
    Ok(events)
}

fn parse_event(line: &str) -> Result<TraceEvent> {
    let mut parts = line.split_whitespace().peekable();
    let keyword = match parts.peek() {
        Some(&word @ ("touch" | "resize")) => {
            parts.next();
            Some(word)
        }
        _ => None,
    };
    let x: f32 = parse_number(parts.next())?;
    let y: f32 = parse_number(parts.next())?;
    if let Some(extra) = parts.next() {
        bail!("unexpected token {extra:?}");
    }
    Ok(match keyword {
        Some("resize") => {
            if x < 0.0 || y < 0.0 || x.fract() != 0.0 || y.fract() != 0.0 {
                bail!("resize expects whole pixel sizes, got {x} {y}");
            }
            TraceEvent::Resize(x as u32, y as u32)
        }
        Some(_) => TraceEvent::Touch(Vec2::new(x, y)),
        None => TraceEvent::Pointer(Vec2::new(x, y)),
    })
}

fn parse_number(value: Option<&str>) -> Result<f32> {
    let value = value.ok_or_else(|| anyhow!("missing coordinate"))?;
    value
        .parse::<f32>()
        .map_err(|err| anyhow!("failed to parse coordinate {value:?}: {err}"))
}

/// Host without a display: a container filling a window whose size comes
/// from a viewport provider, and a frame scheduler that only counts requests.
pub struct HeadlessHost {
    viewport: Arc<dyn ViewportProvider>,
    attached: bool,
    pending_frames: u64,
    draws: u64,
}

impl HeadlessHost {
    pub fn new(viewport: Arc<dyn ViewportProvider>) -> Self {
        Self {
            viewport,
            attached: false,
            pending_frames: 0,
            draws: 0,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn pending_frames(&self) -> u64 {
        self.pending_frames
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl FrameScheduler for HeadlessHost {
    type Handle = ();

    fn request_frame(&mut self) -> Result<()> {
        self.pending_frames += 1;
        Ok(())
    }

    fn cancel_frame(&mut self, _handle: ()) {
        self.pending_frames = self.pending_frames.saturating_sub(1);
    }
}

impl Host for HeadlessHost {
    fn container_size(&self) -> Option<(u32, u32)> {
        Some(self.viewport.viewport_size())
    }

    fn window_size(&self) -> Vec2 {
        let (width, height) = self.viewport.viewport_size();
        Vec2::new(width as f32, height as f32)
    }

    fn attach_surface(&mut self, _size: (u32, u32)) -> Result<()> {
        self.attached = true;
        Ok(())
    }

    fn resize_surface(&mut self, _size: (u32, u32)) {}

    fn draw(&mut self, _scene: &Scene) -> Result<()> {
        self.draws += 1;
        Ok(())
    }

    fn detach_surface(&mut self) {
        self.attached = false;
    }
}

/// Outcome of a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub class: ViewportClass,
    pub size: (u32, u32),
    pub vertices: usize,
    pub triangles: usize,
    pub frames: u64,
    pub rotation: Orientation,
    pub target: Orientation,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Viewport: {} ({}x{})", self.class, self.size.0, self.size.1)?;
        writeln!(
            f,
            "Torus: {} vertices, {} triangles",
            self.vertices, self.triangles
        )?;
        writeln!(f, "Frames: {}", self.frames)?;
        write!(
            f,
            "Final rotation: x={:.4} y={:.4} target: x={:.4} y={:.4}",
            self.rotation.x, self.rotation.y, self.target.x, self.target.y
        )
    }
}

/// Mounts the widget headless and runs `frames` frames, applying the next
/// trace event before each one. Runs at least one frame per trace event.
pub fn run_headless(size: (u32, u32), frames: u64, trace: &[TraceEvent]) -> Result<ReplayReport> {
    let viewport = Arc::new(SharedViewport::new(size));
    let mut widget = Widget::mount(HeadlessHost::new(viewport.clone()))?
        .ok_or_else(|| anyhow!("headless container unavailable"))?;
    widget.start()?;

    let total = frames.max(trace.len() as u64);
    for index in 0..total {
        match trace.get(index as usize) {
            Some(TraceEvent::Pointer(position)) => widget.on_pointer_move(*position),
            Some(TraceEvent::Touch(position)) => widget.on_touch_move(Some(*position)),
            Some(TraceEvent::Resize(width, height)) => {
                viewport.update((*width, *height));
                widget.on_resize();
            }
            None => {}
        }
        widget.on_frame()?;
    }

    let report = ReplayReport {
        class: widget.profile().class,
        size: widget.surface_size(),
        vertices: widget.scene().mesh.geometry.vertex_count(),
        triangles: widget.scene().mesh.geometry.triangle_count(),
        frames: widget.frame_count(),
        rotation: widget.rotation(),
        target: widget.target(),
    };
    widget.unmount();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pointer_and_touch_lines() {
        let trace = parse_trace("# sweep\n\n10 20\ntouch 5.5 6\n").unwrap();
        assert_eq!(
            trace,
            vec![
                TraceEvent::Pointer(Vec2::new(10.0, 20.0)),
                TraceEvent::Touch(Vec2::new(5.5, 6.0)),
            ]
        );
    }

    #[test]
    fn parses_resize_lines() {
        let trace = parse_trace("resize 400 900\n").unwrap();
        assert_eq!(trace, vec![TraceEvent::Resize(400, 900)]);
        assert!(parse_trace("resize 400.5 900").is_err());
        assert!(parse_trace("resize -1 900").is_err());
    }

    #[test]
    fn resize_keeps_profile_but_follows_window() {
        let trace = [
            TraceEvent::Resize(500, 1000),
            TraceEvent::Pointer(Vec2::new(500.0, 500.0)),
        ];
        let report = run_headless((1280, 720), 2, &trace).unwrap();
        assert_eq!(report.class, ViewportClass::Standard);
        assert_eq!(report.size, (500, 1000));
        assert!((report.target.y - 1.2 * std::f32::consts::PI).abs() < 1e-5);
        assert_eq!(report.target.x, 0.0);
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = parse_trace("10 20\n10\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
        assert!(parse_trace("1 2 3").is_err());
        assert!(parse_trace("touch x 2").is_err());
    }

    #[test]
    fn centered_pointer_keeps_torus_still() {
        let report = run_headless((1000, 800), 10, &[TraceEvent::Pointer(Vec2::new(500.0, 400.0))])
            .unwrap();
        assert_eq!(report.frames, 10);
        assert_eq!(report.rotation, Orientation::ZERO);
        assert_eq!(report.target, Orientation::ZERO);
    }

    #[test]
    fn trace_longer_than_frame_budget_is_fully_replayed() {
        let trace = vec![TraceEvent::Touch(Vec2::new(1000.0, 0.0)); 3];
        let report = run_headless((1000, 800), 1, &trace).unwrap();
        assert_eq!(report.frames, 3);
        assert!(report.rotation.x > 0.0 && report.rotation.x < report.target.x);
    }

    #[test]
    fn report_lists_profile_and_rotation() {
        let report = run_headless((500, 400), 0, &[]).unwrap();
        let text = report.to_string();
        assert!(text.contains("Viewport: compact (500x400)"));
        assert!(text.contains("Torus: 1683 vertices, 3200 triangles"));
        assert!(text.contains("Frames: 0"));
        assert!(text.contains("Final rotation: x=0.0000 y=0.0000"));
    }

    #[test]
    fn headless_host_tracks_surface_and_frames() {
        let mut host = HeadlessHost::new(Arc::new(SharedViewport::new((640, 480))));
        assert_eq!(host.container_size(), Some((640, 480)));
        host.attach_surface((640, 480)).unwrap();
        host.request_frame().unwrap();
        host.cancel_frame(());
        assert!(host.is_attached());
        assert_eq!(host.pending_frames(), 0);
        host.detach_surface();
        assert!(!host.is_attached());
        assert_eq!(host.draws(), 0);
    }
}
