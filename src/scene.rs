use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::TorusGeometry;
use crate::motion::Orientation;
use crate::viewport::ViewportProfile;

/// Color written into every vertex of the torus.
pub const TORUS_COLOR: Vec3 = Vec3::new(0.88, 0.53, 0.29);

/// Perspective camera on the +Z axis looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    pub fn new(fov_degrees: f32, aspect: f32, distance: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near: Self::NEAR,
            far: Self::FAR,
            position: Vec3::new(0.0, 0.0, distance),
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    /// Projection into wgpu clip space (depth in `0..1`).
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect.max(0.01),
            self.near,
            self.far,
        )
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Physically based surface description. Only the parameters the torus
/// uses are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardMaterial {
    /// Use the geometry's color attribute instead of `color`.
    pub vertex_colors: bool,
    pub color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            vertex_colors: false,
            color: Vec3::ONE,
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the lit surface towards the light.
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: TorusGeometry,
    pub material: StandardMaterial,
    pub orientation: Orientation,
}

impl Mesh {
    /// Rotation applied X first, then Y, matching an `XYZ` Euler order.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.orientation.x) * Mat4::from_rotation_y(self.orientation.y)
    }
}

/// The widget's whole scene: one torus, a key light and a fill light.
///
/// The topology is fixed once assembled; afterwards only the mesh
/// orientation and the camera aspect change.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: PerspectiveCamera,
    pub mesh: Mesh,
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
}

impl Scene {
    pub fn assemble(profile: &ViewportProfile, aspect: f32) -> Self {
        let camera = PerspectiveCamera::new(profile.fov_degrees, aspect, profile.camera_distance);

        let mut geometry = TorusGeometry::new(&profile.torus);
        geometry.set_uniform_color(TORUS_COLOR);

        let material = StandardMaterial {
            vertex_colors: true,
            roughness: 0.2,
            metalness: 0.4,
            ..StandardMaterial::default()
        };

        Self {
            camera,
            mesh: Mesh {
                geometry,
                material,
                orientation: Orientation::ZERO,
            },
            directional: DirectionalLight {
                color: Vec3::ONE,
                intensity: 1.0,
                position: Vec3::new(5.0, 5.0, 5.0),
                target: Vec3::ZERO,
            },
            ambient: AmbientLight {
                color: Vec3::ONE,
                intensity: 0.6,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportClass;

    #[test]
    fn assembles_standard_scene() {
        let scene = Scene::assemble(&ViewportProfile::STANDARD, 1.5);
        assert_eq!(scene.camera.fov_degrees, 75.0);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(scene.camera.near, 0.1);
        assert_eq!(scene.camera.far, 1000.0);
        assert_eq!(scene.camera.aspect, 1.5);
        assert_eq!(scene.mesh.geometry.vertex_count(), 65 * 101);
        assert!(scene.mesh.material.vertex_colors);
        assert_eq!(scene.mesh.material.roughness, 0.2);
        assert_eq!(scene.mesh.material.metalness, 0.4);
        assert_eq!(scene.ambient.intensity, 0.6);
        assert_eq!(scene.directional.position, Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn compact_scene_uses_coarser_torus() {
        let scene = Scene::assemble(&ViewportProfile::for_class(ViewportClass::Compact), 0.5);
        assert_eq!(scene.camera.fov_degrees, 85.0);
        assert_eq!(scene.camera.position.z, 7.0);
        assert_eq!(scene.mesh.geometry.vertex_count(), 33 * 51);
        assert!(scene
            .mesh
            .geometry
            .colors()
            .iter()
            .all(|color| *color == TORUS_COLOR));
    }

    #[test]
    fn camera_projects_origin_to_screen_center() {
        let camera = PerspectiveCamera::new(75.0, 16.0 / 9.0, 6.0);
        let clip = camera.view_proj() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn model_matrix_applies_orientation() {
        let mut scene = Scene::assemble(&ViewportProfile::STANDARD, 1.0);
        assert_eq!(scene.mesh.model_matrix(), Mat4::IDENTITY);
        scene.mesh.orientation = Orientation::new(0.0, std::f32::consts::FRAC_PI_2);
        let rotated = scene.mesh.model_matrix().transform_vector3(Vec3::X);
        assert!((rotated - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn light_points_back_towards_its_position() {
        let scene = Scene::assemble(&ViewportProfile::STANDARD, 1.0);
        let direction = scene.directional.direction();
        assert!((direction - Vec3::splat(1.0).normalize()).length() < 1e-6);
    }
}
