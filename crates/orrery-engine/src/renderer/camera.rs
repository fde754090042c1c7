use std::f32::consts::{PI, TAU};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Perspective camera looking from `position` at `target`, Y-up.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    /// Viewport size in CSS pixels, used to scale pointer input.
    pub viewport: Vec2,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// World-space eye position, w = 1.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y_deg,
            aspect: 1.0,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            viewport: Vec2::ONE,
        };
        camera.resize(width, height);
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// WebGPU clip space, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Resize the viewport (e.g. on window resize). Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("ignoring degenerate viewport {}x{}", width, height);
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.aspect = width / height;
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 1.0, 0.1, 1000.0)
    }
}

const MIN_POLAR: f32 = 1e-4;
const DOLLY_STEP: f32 = 0.95;

/// Mouse-driven orbit around the camera target.
///
/// Pointer drags accumulate spherical deltas; `update` applies them to the
/// camera, easing them out over several frames when damping is enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    drag_from: Option<Vec2>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.03,
            rotate_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            drag_from: None,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a rotation from a pointer movement of `dx, dy` pixels in a
    /// viewport `viewport_height` pixels tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h * self.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Wheel zoom: positive deltas move away from the target.
    pub fn dolly(&mut self, delta: f32) {
        if delta > 0.0 {
            self.scale /= DOLLY_STEP;
        } else if delta < 0.0 {
            self.scale *= DOLLY_STEP;
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag_from = Some(Vec2::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        if let Some(from) = self.drag_from {
            self.rotate(x - from.x, y - from.y, viewport_height);
            self.drag_from = Some(Vec2::new(x, y));
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    /// Apply pending deltas to the camera. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }

        // Spherical coordinates around +Y: theta from +Z towards +X, phi from +Y.
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }
        phi = phi.clamp(MIN_POLAR, PI - MIN_POLAR);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let new_offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        let moved = (new_offset - offset).length_squared() > 1e-12;
        camera.position = camera.target + new_offset;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
        moved
    }
}

/// What drives the camera each frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraRig {
    /// Circle the origin: for animation time `t`, the eye sits at
    /// `(cos(t*rate)*distance, cos(t*rate), sin(t*rate)*distance)`.
    Animated { distance: f32, rate: f32 },
    /// User-driven orbit.
    Orbit(OrbitControls),
}

impl CameraRig {
    pub fn animated() -> Self {
        CameraRig::Animated {
            distance: 6.0,
            rate: 0.75,
        }
    }

    pub fn orbit() -> Self {
        CameraRig::Orbit(OrbitControls::default())
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, CameraRig::Animated { .. })
    }

    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        match self {
            CameraRig::Orbit(controls) => Some(controls),
            CameraRig::Animated { .. } => None,
        }
    }

    pub fn update(&mut self, camera: &mut PerspectiveCamera, t: f32) {
        match self {
            CameraRig::Animated { distance, rate } => {
                let angle = t * *rate;
                camera.position = Vec3::new(angle.cos() * *distance, angle.cos(), angle.sin() * *distance);
                camera.look_at(Vec3::ZERO);
            }
            CameraRig::Orbit(controls) => {
                controls.update(camera);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_aspect() {
        let mut cam = PerspectiveCamera::default();
        cam.resize(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.resize(800.0, 0.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = PerspectiveCamera::new(75.0, 800.0, 600.0, 0.1, 1000.0)
            .with_position(Vec3::new(0.0, 3.5, 4.5));
        let clip = cam.view_projection() * cam.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn animated_rig_circles_origin() {
        let mut cam = PerspectiveCamera::default();
        let mut rig = CameraRig::animated();
        rig.update(&mut cam, 0.0);
        assert!((cam.position - Vec3::new(6.0, 1.0, 0.0)).length() < 1e-5);

        let t = std::f32::consts::FRAC_PI_2 / 0.75;
        rig.update(&mut cam, t);
        assert!((cam.position - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-4);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut cam = PerspectiveCamera::default().with_position(Vec3::new(0.0, 3.5, 4.5));
        let before = cam.position.length();
        let mut controls = OrbitControls::default();
        controls.rotate(120.0, -40.0, 600.0);
        for _ in 0..30 {
            controls.update(&mut cam);
        }
        assert!((cam.position.length() - before).abs() < 1e-3);
        assert!(cam.position.x.abs() > 0.01);
    }

    #[test]
    fn damping_eases_out() {
        let mut cam = PerspectiveCamera::default().with_position(Vec3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::default();
        controls.rotate(100.0, 0.0, 600.0);

        let p0 = cam.position;
        controls.update(&mut cam);
        let first = (cam.position - p0).length();
        let p1 = cam.position;
        controls.update(&mut cam);
        let second = (cam.position - p1).length();
        assert!(second < first);
        assert!(second > 0.0);
    }

    #[test]
    fn dolly_changes_distance() {
        let mut cam = PerspectiveCamera::default().with_position(Vec3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::default();
        controls.dolly(1.0);
        controls.update(&mut cam);
        assert!(cam.position.length() > 5.0);
        controls.dolly(-1.0);
        controls.dolly(-1.0);
        controls.update(&mut cam);
        assert!(cam.position.length() < 5.0);
    }

    #[test]
    fn drag_rotates_only_while_pressed() {
        let mut controls = OrbitControls::default();
        controls.pointer_move(50.0, 0.0, 600.0);
        let mut cam = PerspectiveCamera::default().with_position(Vec3::new(0.0, 0.0, 5.0));
        assert!(!controls.update(&mut cam));

        controls.pointer_down(0.0, 0.0);
        controls.pointer_move(50.0, 0.0, 600.0);
        controls.pointer_up();
        assert!(controls.update(&mut cam));
    }
}
