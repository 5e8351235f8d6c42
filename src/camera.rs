use std::f32::consts::PI;

use nalgebra_glm::{look_at, perspective, vec3, Mat4, Vec2, Vec3};

/// Perspective camera orbiting a fixed target.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
	vertical_fov: f32,
	near_clip: f32,
	far_clip: f32,

	target: Vec3,
	distance: f32,
	/// Angle from the up axis.
	polar: f32,
	/// Angle around the up axis, measured from +Z towards +X.
	azimuth: f32,

	proj: Mat4,
	view: Mat4,

	scr_size: Vec2,
}

fn up() -> Vec3 {
	vec3(0.0, 1.0, 0.0)
}

pub const MIN_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 10_000.0;
/// Keeps the view direction off the up axis.
pub const MIN_POLAR_ANGLE: f32 = 1e-6;
pub const MAX_POLAR_ANGLE: f32 = PI / (3.0 / 2.0);

const ROTATE_SPEED: f32 = 2.0 * PI;
const ZOOM_SPEED: f32 = 0.001;

impl OrbitCamera {
	pub fn new(scr_size: [f32; 2]) -> Self {
		let mut this = Self {
			vertical_fov: 55f32.to_radians(),
			near_clip: 1.0,
			far_clip: 20_000.0,

			target: vec3(0.0, 10.0, 0.0),
			distance: 1.0,
			polar: 0.0,
			azimuth: 0.0,

			proj: Mat4::identity(),
			view: Mat4::identity(),

			scr_size: scr_size.into(),
		};

		this.reset_view();
		this.recalc_proj();
		this
	}

	pub fn reset_view(&mut self) {
		self.look_from(vec3(0.0, 30.0, 100.0));
	}

	/// Moves the camera to `pos`, keeping the target, within the orbit limits.
	pub fn look_from(&mut self, pos: Vec3) {
		let offset = pos - self.target;
		self.distance = offset.norm();
		self.polar = (offset.y / self.distance).clamp(-1.0, 1.0).acos();
		self.azimuth = offset.x.atan2(offset.z);
		self.clamp();
		self.recalc_view();
	}

	pub fn resize(&mut self, new_scr_size: [f32; 2]) -> bool {
		let new_scr_size: Vec2 = new_scr_size.into();

		if new_scr_size == self.scr_size || new_scr_size.min() <= 0.0 {
			return false;
		}

		self.scr_size = new_scr_size;
		self.recalc_proj();
		true
	}

	/// Orbits by a pointer drag of `delta` pixels.
	pub fn rotate(&mut self, delta: Vec2) {
		let height = self.scr_size.y.max(1.0);
		self.azimuth -= ROTATE_SPEED * delta.x / height;
		self.polar -= ROTATE_SPEED * delta.y / height;
		self.clamp();
		self.recalc_view();
	}

	/// Positive `scroll` moves towards the target.
	pub fn zoom(&mut self, scroll: f32) {
		self.distance *= (-scroll * ZOOM_SPEED).exp();
		self.clamp();
		self.recalc_view();
	}

	fn clamp(&mut self) {
		self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
		self.polar = self.polar.clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
	}

	pub fn pos(&self) -> Vec3 {
		let sin_polar = self.polar.sin();
		self.target
			+ vec3(
				sin_polar * self.azimuth.sin(),
				self.polar.cos(),
				sin_polar * self.azimuth.cos(),
			) * self.distance
	}

	pub fn view_proj(&self) -> Mat4 {
		self.proj * self.view
	}

	fn recalc_proj(&mut self) {
		self.proj = perspective(
			self.scr_size.x / self.scr_size.y,
			self.vertical_fov,
			self.near_clip,
			self.far_clip,
		);
	}

	fn recalc_view(&mut self) {
		self.view = look_at(&self.pos(), &self.target, &up());
	}
}

#[cfg(test)]
mod tests {
	use nalgebra_glm as glm;

	use super::*;

	#[test]
	fn initial_placement() {
		let camera = OrbitCamera::new([800.0, 600.0]);
		assert!(glm::distance(&camera.pos(), &vec3(0.0, 30.0, 100.0)) < 1e-3);
		assert!((camera.distance - 20f32.hypot(100.0)).abs() < 1e-3);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut camera = OrbitCamera::new([800.0, 600.0]);
		camera.zoom(1e6);
		assert_eq!(camera.distance, MIN_DISTANCE);
		camera.zoom(-1e6);
		assert_eq!(camera.distance, MAX_DISTANCE);
	}

	#[test]
	fn cannot_orbit_far_below_horizon() {
		let mut camera = OrbitCamera::new([800.0, 600.0]);
		camera.rotate(glm::vec2(0.0, -1e5));
		assert_eq!(camera.polar, MAX_POLAR_ANGLE);
		camera.rotate(glm::vec2(0.0, 1e5));
		assert_eq!(camera.polar, MIN_POLAR_ANGLE);
		assert!(camera.view_proj().iter().all(|v| v.is_finite()));
	}

	#[test]
	fn reset_view_restores_initial_placement() {
		let mut camera = OrbitCamera::new([800.0, 600.0]);
		camera.rotate(glm::vec2(120.0, 40.0));
		camera.zoom(300.0);
		camera.reset_view();
		assert!(glm::distance(&camera.pos(), &vec3(0.0, 30.0, 100.0)) < 1e-3);
	}

	#[test]
	fn resize_only_when_changed() {
		let mut camera = OrbitCamera::new([800.0, 600.0]);
		assert!(!camera.resize([800.0, 600.0]));
		assert!(!camera.resize([0.0, 600.0]));

		let before = camera.view_proj();
		assert!(camera.resize([1600.0, 600.0]));
		assert_ne!(before, camera.view_proj());
	}

	#[test]
	fn target_projects_to_screen_centre() {
		let camera = OrbitCamera::new([1280.0, 720.0]);
		let clip = camera.view_proj() * glm::vec4(0.0, 10.0, 0.0, 1.0);
		let ndc = clip.xyz() / clip.w;
		assert!(ndc.x.abs() < 1e-4);
		assert!(ndc.y.abs() < 1e-4);
		assert!(ndc.z > -1.0 && ndc.z < 1.0);
	}
}
