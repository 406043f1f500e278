use glam::{Mat3, Mat4, Vec3};

use crate::scene::Scene;

/// Camera parameters consumed by the renderer's uniform buffer.
#[derive(Clone, Debug)]
pub struct CameraParams {
    pub view_proj: Mat4,
    pub position: Vec3,
}

impl CameraParams {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            view_proj: scene.camera.view_proj(),
            position: scene.camera.position,
        }
    }
}

/// Lighting state consumed by the renderer's uniform buffer.
#[derive(Clone, Debug)]
pub struct LightParams {
    /// Unit vector from the surface towards the directional light.
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Ambient color already scaled by its intensity.
    pub ambient: Vec3,
}

impl LightParams {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            direction: scene.directional.direction(),
            color: scene.directional.color,
            intensity: scene.directional.intensity,
            ambient: scene.ambient.color * scene.ambient.intensity,
        }
    }
}

/// Per-mesh transform and material parameters.
#[derive(Clone, Debug)]
pub struct MeshParams {
    pub model: Mat4,
    pub normal: Mat3,
    pub base_color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub vertex_colors: bool,
}

impl MeshParams {
    pub fn from_scene(scene: &Scene) -> Self {
        let model = scene.mesh.model_matrix();
        let material = &scene.mesh.material;
        Self {
            model,
            normal: Mat3::from_mat4(model).inverse().transpose(),
            base_color: material.color,
            roughness: material.roughness,
            metalness: material.metalness,
            vertex_colors: material.vertex_colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Orientation;
    use crate::viewport::ViewportProfile;

    #[test]
    fn ambient_is_premultiplied_by_intensity() {
        let scene = Scene::assemble(&ViewportProfile::STANDARD, 1.0);
        let light = LightParams::from_scene(&scene);
        assert!((light.ambient - Vec3::splat(0.6)).length() < 1e-6);
        assert_eq!(light.intensity, 1.0);
    }

    #[test]
    fn normal_matrix_of_pure_rotation_is_the_rotation() {
        let mut scene = Scene::assemble(&ViewportProfile::STANDARD, 1.0);
        scene.mesh.orientation = Orientation::new(0.4, -1.1);
        let params = MeshParams::from_scene(&scene);
        let rotation = Mat3::from_mat4(params.model);
        assert!(params.normal.abs_diff_eq(rotation, 1e-5));
        assert!(params.vertex_colors);
    }
}
