use std::f32::consts::PI;

use nalgebra_glm as glm;

/// Sun placement derived from the sky parameters.
///
/// The sky shader takes `position` as is, the water shader takes the
/// normalized `direction`. Both are kept so each consumer gets exactly the
/// vector it expects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sun {
	pub position: glm::Vec3,
	pub direction: glm::Vec3,
}

/// Spherical to cartesian conversion of the GUI's sun parameters.
///
/// `inclination` is a fraction of a half turn in `[0, 0.5]`, `azimuth` a
/// fraction of a full turn in `[0, 1]`. The result is not normalized.
pub fn sun_position(inclination: f32, azimuth: f32) -> glm::Vec3 {
	let theta = PI * (inclination - 0.5);
	let phi = 2.0 * PI * (azimuth - 0.5);

	glm::vec3(phi.cos(), phi.sin() * theta.sin(), phi.sin() * theta.cos())
}

impl Sun {
	pub fn new(inclination: f32, azimuth: f32) -> Self {
		let position = sun_position(inclination, azimuth);

		Self {
			position,
			direction: glm::normalize(&position),
		}
	}

	/// Height of the sun above the horizon, in `[-1, 1]`.
	pub fn elevation(&self) -> f32 {
		self.direction.y
	}
}

impl Default for Sun {
	fn default() -> Self {
		let sky = crate::settings::SkySettings::default();
		Self::new(sky.inclination, sky.azimuth)
	}
}
