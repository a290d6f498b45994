use cgmath::{InnerSpace, Vector3};
use std::f32::consts::PI;

/// Camera orbiting a target point, Y-up
///
/// `alpha` is the longitudinal angle around Y, `beta` the latitudinal angle
/// measured from +Y and `radius` the distance to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcRotateCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vector3<f32>,
    pub bounds: ArcRotateBounds,
}

impl ArcRotateCamera {
    pub fn new(alpha: f32, beta: f32, radius: f32, target: Vector3<f32>) -> Self {
        let mut camera = Self {
            alpha,
            beta,
            radius,
            target,
            bounds: ArcRotateBounds::default(),
        };
        camera.set_beta(beta);
        camera.set_radius(radius);
        camera
    }

    /// Eye position in world space
    pub fn position(&self) -> Vector3<f32> {
        calculate_cartesian_eye_position(self.alpha, self.beta, self.radius, self.target)
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(
            self.bounds.min_radius.unwrap_or(f32::EPSILON),
            self.bounds.max_radius.unwrap_or(f32::MAX),
        );
    }

    /// Zooms proportionally to the current distance
    pub fn add_radius(&mut self, delta: f32) {
        let corrected_zoom = self.radius.max(1.0).log10().max(0.1) * delta;
        self.set_radius(self.radius + corrected_zoom);
    }

    pub fn set_beta(&mut self, beta: f32) {
        self.beta = beta.clamp(self.bounds.min_beta, self.bounds.max_beta);
    }

    pub fn add_beta(&mut self, delta: f32) {
        self.set_beta(self.beta + delta);
    }

    pub fn add_alpha(&mut self, delta: f32) {
        self.alpha += delta;
    }

    /// Moves the target (and with it the eye) in the camera's view plane
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.position()).normalize();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward).normalize();

        let pan_scale = self.radius * 0.1;
        self.target += right * delta.0 * pan_scale + up * delta.1 * pan_scale;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcRotateBounds {
    pub min_radius: Option<f32>,
    pub max_radius: Option<f32>,
    pub min_beta: f32,
    pub max_beta: f32,
}

impl Default for ArcRotateBounds {
    fn default() -> Self {
        Self {
            min_radius: Some(0.5),
            max_radius: Some(500.0),
            min_beta: 0.01,
            max_beta: PI - 0.01,
        }
    }
}

fn calculate_cartesian_eye_position(
    alpha: f32,
    beta: f32,
    radius: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        radius * alpha.cos() * beta.sin(),
        radius * beta.cos(),
        radius * alpha.sin() * beta.sin(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_position_on_positive_x() {
        let camera = ArcRotateCamera::new(0.0, FRAC_PI_2, 3.0, Vector3::new(0.0, 1.0, 0.0));
        let eye = camera.position();
        assert!((eye.x - 3.0).abs() < 1e-5);
        assert!((eye.y - 1.0).abs() < 1e-5);
        assert!(eye.z.abs() < 1e-5);
    }

    #[test]
    fn test_beta_is_clamped_off_the_poles() {
        let mut camera = ArcRotateCamera::new(0.0, 0.0, 3.0, Vector3::new(0.0, 0.0, 0.0));
        assert!(camera.beta > 0.0);

        camera.add_beta(10.0);
        assert!(camera.beta < PI);
    }

    #[test]
    fn test_radius_bounds() {
        let mut camera = ArcRotateCamera::new(0.0, 1.0, 3.0, Vector3::new(0.0, 0.0, 0.0));
        camera.set_radius(0.0);
        assert_eq!(camera.radius, 0.5);
        camera.set_radius(1.0e6);
        assert_eq!(camera.radius, 500.0);
    }

    #[test]
    fn test_pan_moves_target_and_keeps_radius() {
        let mut camera = ArcRotateCamera::new(0.0, FRAC_PI_2, 4.0, Vector3::new(0.0, 0.0, 0.0));
        let before = camera.position() - camera.target;
        camera.pan((1.0, 0.0));
        let after = camera.position() - camera.target;

        assert!(camera.target.magnitude() > 0.0);
        assert!((before - after).magnitude() < 1e-5);
    }
}
