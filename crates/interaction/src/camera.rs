use foundation::math::{Vec2, Vec3};
use runtime::CameraPose;
use scene::picking::Ray;

/// Pinhole camera used to turn pointer positions into world-space rays.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub pose: CameraPose,
    pub up: Vec3,
    pub fov_y_rad: f64,
    pub viewport_px: Vec2,
}

impl Camera {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_y_rad: 45f64.to_radians(),
            viewport_px: Vec2::new(1280.0, 720.0),
        }
    }

    pub fn set_viewport(&mut self, width_px: f64, height_px: f64) {
        self.viewport_px = Vec2::new(width_px.max(1.0), height_px.max(1.0));
    }

    /// Unprojects a pixel position into a world-space ray through the
    /// camera. `None` when the camera is degenerate (eye on top of the
    /// target, or up parallel to the view direction).
    pub fn screen_ray(&self, pos_px: Vec2) -> Option<Ray> {
        let w = self.viewport_px.x;
        let h = self.viewport_px.y;
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        let ndc_x = (pos_px.x / w) * 2.0 - 1.0;
        let ndc_y = 1.0 - (pos_px.y / h) * 2.0;

        let forward = (self.pose.target - self.pose.eye).normalized()?;
        let right = forward.cross(self.up).normalized()?;
        let cam_up = right.cross(forward);

        let tan_half = (self.fov_y_rad * 0.5).tan();
        let aspect = w / h;
        let dir = (forward + right * (ndc_x * tan_half * aspect) + cam_up * (ndc_y * tan_half))
            .normalized()?;
        Some(Ray::new(self.pose.eye, dir))
    }

    /// Pixel position of the viewport center.
    pub fn center_px(&self) -> Vec2 {
        self.viewport_px * 0.5
    }
}
