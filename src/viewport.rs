use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::geometry::TorusParams;

/// Widest layout width, in CSS pixels, that still counts as a compact display.
pub const COMPACT_MAX_WIDTH: f32 = 768.0;

/// Display class chosen once at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    Compact,
    Standard,
}

impl ViewportClass {
    pub fn classify(width: f32) -> Self {
        if width <= COMPACT_MAX_WIDTH {
            Self::Compact
        } else {
            Self::Standard
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Camera and tessellation parameters selected for a display class.
///
/// Compact displays get a wider field of view, a slightly more distant
/// camera and a smaller, coarser torus so constrained devices render less.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportProfile {
    pub class: ViewportClass,
    pub fov_degrees: f32,
    pub camera_distance: f32,
    pub torus: TorusParams,
}

impl ViewportProfile {
    pub const COMPACT: Self = Self {
        class: ViewportClass::Compact,
        fov_degrees: 85.0,
        camera_distance: 7.0,
        torus: TorusParams {
            radius: 1.6,
            tube: 0.7,
            radial_segments: 32,
            tubular_segments: 50,
        },
    };

    pub const STANDARD: Self = Self {
        class: ViewportClass::Standard,
        fov_degrees: 75.0,
        camera_distance: 6.0,
        torus: TorusParams {
            radius: 2.0,
            tube: 1.0,
            radial_segments: 64,
            tubular_segments: 100,
        },
    };

    /// Picks the profile for a layout width. Evaluated once per mount; later
    /// resizes keep whatever was chosen here.
    pub fn for_width(width: f32) -> Self {
        Self::for_class(ViewportClass::classify(width))
    }

    pub fn for_class(class: ViewportClass) -> Self {
        match class {
            ViewportClass::Compact => Self::COMPACT,
            ViewportClass::Standard => Self::STANDARD,
        }
    }
}

/// Reports the current size of whatever the widget is measured against.
pub trait ViewportProvider: Send + Sync {
    fn viewport_size(&self) -> (u32, u32);
}

/// Viewport whose size is written by a resize source and read by the host.
#[derive(Debug)]
pub struct SharedViewport {
    size: RwLock<(u32, u32)>,
}

impl SharedViewport {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size: RwLock::new(size),
        }
    }

    /// Zero sizes are stored as given; consumers treat them as collapsed.
    pub fn update(&self, size: (u32, u32)) {
        *self.size.write() = size;
    }
}

impl ViewportProvider for SharedViewport {
    fn viewport_size(&self) -> (u32, u32) {
        *self.size.read()
    }
}

/// Width over height, falling back to a square aspect for a collapsed container.
pub fn aspect_ratio(size: (u32, u32)) -> f32 {
    if size.1 == 0 {
        1.0
    } else {
        size.0 as f32 / size.1 as f32
    }
}
