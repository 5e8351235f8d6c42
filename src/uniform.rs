use crate::{settings::WaterSettings, sun::Sun};

pub const TURBIDITY: f32 = 10.0;
pub const RAYLEIGH: f32 = 2.0;
pub const MIE_COEFFICIENT: f32 = 0.005;
pub const MIE_DIRECTIONAL_G: f32 = 0.8;

pub const SUN_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
/// `0x001e0f`
pub const WATER_COLOR: [f32; 3] = [0.0, 30.0 / 255.0, 15.0 / 255.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyUniforms {
	pub sun_position: [f32; 3],
	pub turbidity: f32,
	pub rayleigh: f32,
	pub mie_coefficient: f32,
	pub mie_directional_g: f32,
}

impl SkyUniforms {
	pub fn new(sun: &Sun) -> Self {
		Self {
			sun_position: sun.position.into(),
			turbidity: TURBIDITY,
			rayleigh: RAYLEIGH,
			mie_coefficient: MIE_COEFFICIENT,
			mie_directional_g: MIE_DIRECTIONAL_G,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterUniforms {
	pub sun_direction: [f32; 3],
	pub sun_color: [f32; 3],
	pub water_color: [f32; 3],
	pub distortion_scale: f32,
	pub size: f32,
	pub alpha: f32,
	pub time: f32,
}

impl WaterUniforms {
	pub fn new(settings: &WaterSettings, sun: &Sun, time: f32) -> Self {
		Self {
			sun_direction: sun.direction.into(),
			sun_color: SUN_COLOR,
			water_color: WATER_COLOR,
			distortion_scale: settings.distortion_scale,
			size: settings.size,
			alpha: settings.alpha,
			time,
		}
	}
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
	pub sky: SkyUniforms,
	pub water: WaterUniforms,
}
