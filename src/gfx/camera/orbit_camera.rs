use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Z-up orbit camera described by distance, pitch and yaw around a target.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // derived from the angles in `update()`
            target,
            up: Vector3::unit_z(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: cgmath::Rad(std::f32::consts::PI / 6.0),
            znear: 1.0,
            zfar: 2000.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    pub fn reset_to_default(&mut self) {
        self.distance = 400.0;
        self.pitch = 0.4;
        self.yaw = 0.2;
        self.target = Vector3::zero();

        self.update();
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    /// Zooms by a distance-proportional step so the wheel feels the same
    /// close up and far away.
    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.0 + f32::EPSILON)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction.
    ///
    /// `delta.0` moves along the camera's right axis, `delta.1` along its
    /// true up axis. Both eye and target move, preserving the view
    /// direction.
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale by distance for a consistent feel at all zoom levels.
        let pan_scale = self.distance * 0.1;

        let total_movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        self.eye += total_movement;
        self.target += total_movement;
    }

    /// Updates the eye position after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(1200.0),
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
        }
    }
}

/// Spherical to cartesian conversion for a Z-up coordinate system.
fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * pitch.cos() * yaw.sin(),
        -distance * pitch.cos() * yaw.cos(),
        distance * pitch.sin(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped_to_bounds() {
        let mut camera = OrbitCamera::new(400.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.set_pitch(10.0);
        assert!(camera.pitch <= camera.bounds.max_pitch);
        camera.set_pitch(-10.0);
        assert!(camera.pitch >= camera.bounds.min_pitch);
    }

    #[test]
    fn distance_is_clamped_to_bounds() {
        let mut camera = OrbitCamera::new(400.0, 0.4, 0.2, Vector3::zero(), 1.0);
        camera.bounds.min_distance = Some(10.0);
        camera.set_distance(1.0);
        assert_eq!(camera.distance, 10.0);
        camera.set_distance(1.0e9);
        assert_eq!(camera.distance, 1200.0);
    }

    #[test]
    fn eye_orbits_at_requested_distance() {
        let camera = OrbitCamera::new(400.0, 0.3, 1.2, Vector3::new(5.0, -2.0, 1.0), 1.0);
        let radius = (camera.eye - camera.target).magnitude();
        assert!((radius - 400.0).abs() < 1.0e-3);
    }

    #[test]
    fn pan_preserves_view_direction() {
        let mut camera = OrbitCamera::new(400.0, 0.4, 0.2, Vector3::zero(), 1.0);
        let before = (camera.target - camera.eye).normalize();
        camera.pan((0.5, -0.25));
        let after = (camera.target - camera.eye).normalize();
        assert!(before.dot(after) > 1.0 - 1.0e-5);
    }
}
