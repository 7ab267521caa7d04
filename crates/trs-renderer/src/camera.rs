//! Orbit camera for the 3D viewport

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Orbit camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Orbit center
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Orbit yaw (radians)
    pub yaw: f32,
    /// Orbit pitch (radians)
    pub pitch: f32,
    /// Orbit distance
    pub distance: f32,
}

impl Camera {
    /// Create a new camera with default orbit parameters
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Z,
            fov: 40.0_f32.to_radians(),
            aspect,
            near: 0.1,
            far: 100000.0,
            yaw: 45.0_f32.to_radians(),
            pitch: 30.0_f32.to_radians(),
            distance: 10.0,
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(0.1, 10000.0);
        self.update_position_from_orbit();
    }

    /// Move the orbit center, keeping yaw, pitch and distance
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_position_from_orbit();
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.cos();
        let y = self.distance * self.pitch.cos() * self.yaw.sin();
        let z = self.distance * self.pitch.sin();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Convert screen coordinates to a world ray `(origin, normalized direction)`
    pub fn screen_to_ray(&self, screen: Vec2, screen_size: Vec2) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * screen.x / screen_size.x) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen.y / screen_size.y);

        let inv_proj = self.projection_matrix().inverse();
        let inv_view = self.view_matrix().inverse();
        let unproject = |z: f32| {
            let view = inv_proj * Vec4::new(ndc_x, ndc_y, z, 1.0);
            inv_view.transform_point3(view.truncate() / view.w)
        };

        // wgpu-style depth range: near plane at 0, far plane at 1
        let near_world = unproject(0.0);
        let far_world = unproject(1.0);
        (near_world, (far_world - near_world).normalize())
    }

    /// Project a world point to screen coordinates; `None` when behind the camera
    pub fn world_to_screen(&self, point: Vec3, screen_size: Vec2) -> Option<Vec2> {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen_size.x,
            (1.0 - ndc.y) * 0.5 * screen_size.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(1.5);
        let size = Vec2::new(900.0, 600.0);
        let (origin, direction) = camera.screen_to_ray(size * 0.5, size);
        let to_target = (camera.target - camera.position).normalize();
        assert!(direction.abs_diff_eq(to_target, 1e-4));
        assert!((origin - camera.position).length() < 1.0);
    }

    #[test]
    fn test_world_to_screen_inverts_ray() {
        let camera = Camera::new(1.0);
        let size = Vec2::new(800.0, 800.0);
        let point = Vec3::new(1.0, -0.5, 0.25);
        let screen = camera.world_to_screen(point, size).unwrap();
        let (origin, direction) = camera.screen_to_ray(screen, size);
        // Distance from the point to the ray
        let offset = point - origin;
        let distance = (offset - direction * offset.dot(direction)).length();
        assert!(distance < 1e-3);
    }

    #[test]
    fn test_point_behind_camera() {
        let camera = Camera::new(1.0);
        let behind = camera.position + (camera.position - camera.target);
        assert!(camera.world_to_screen(behind, Vec2::splat(100.0)).is_none());
    }
}
