use crate::{Mat4, Vec3, vec3};

/// First-person perspective camera (right-handed).
///
/// Orientation is stored as yaw (`horizontal`) and pitch (`vertical`) in
/// radians; a yaw of zero looks down +Z.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub horizontal: f32,
    pub vertical: f32,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        position: Vec3,
        horizontal: f32,
        vertical: f32,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            position,
            horizontal,
            vertical,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
        }
    }

    /// Unit forward vector from yaw/pitch.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        let (sh, ch) = self.horizontal.sin_cos();
        let (sv, cv) = self.vertical.sin_cos();
        vec3(cv * sh, sv, cv * ch)
    }

    /// Horizontal right vector (ignores pitch).
    #[inline]
    pub fn right(&self) -> Vec3 {
        let yaw = self.horizontal - std::f32::consts::FRAC_PI_2;
        vec3(yaw.sin(), 0.0, yaw.cos())
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.direction())
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction(), self.up())
    }

    /// OpenGL-style projection (z in [-1,1]).
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}
