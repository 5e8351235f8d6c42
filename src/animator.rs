//! Per-frame scene animation: the sun placement and the water clock.

use crate::{
	settings::{SkySettings, WaterSettings},
	sun::Sun,
	uniform::{FrameUniforms, SkyUniforms, WaterUniforms},
};

/// Simulation time added per rendered frame, independent of wall time.
pub const FRAME_STEP: f64 = 1.0 / 60.0;

/// Re-renders the image based lighting from the sky. Expensive, so it is only
/// invoked when the sun moves.
pub trait EnvironmentCapture {
	fn capture_environment(&mut self, sky: &SkyUniforms);
}

pub trait Redraw {
	fn request_redraw(&self);
}

impl Redraw for egui::Context {
	fn request_redraw(&self) {
		self.request_repaint();
	}
}

#[derive(Clone, Debug, Default)]
pub struct SceneAnimator {
	sun: Sun,
	frames: u64,
}

impl SceneAnimator {
	pub fn new(sky: &SkySettings, capture: &mut impl EnvironmentCapture) -> Self {
		let mut this = Self::default();
		this.recompute_sun(sky, capture);
		this
	}

	/// Places the sun from the sky parameters and recaptures the environment
	/// before returning.
	pub fn recompute_sun(
		&mut self,
		sky: &SkySettings,
		capture: &mut impl EnvironmentCapture,
	) -> Sun {
		self.place_sun(sky);
		capture.capture_environment(&SkyUniforms::new(&self.sun));
		self.sun
	}

	/// Places the sun without touching the environment map. Used when no GL
	/// context is available to capture with.
	pub fn place_sun(&mut self, sky: &SkySettings) -> Sun {
		self.sun = Sun::new(sky.inclination, sky.azimuth);
		self.sun
	}

	pub fn advance_frame(&mut self, redraw: &impl Redraw) {
		self.frames += 1;
		redraw.request_redraw();
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Value of the water's `time` uniform.
	pub fn time(&self) -> f64 {
		self.frames as f64 * FRAME_STEP
	}

	pub fn uniforms(&self, water: &WaterSettings) -> FrameUniforms {
		FrameUniforms {
			sky: SkyUniforms::new(&self.sun),
			water: WaterUniforms::new(water, &self.sun, self.time() as f32),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[derive(Default)]
	struct RecordingCapture {
		captures: Vec<SkyUniforms>,
	}

	impl EnvironmentCapture for RecordingCapture {
		fn capture_environment(&mut self, sky: &SkyUniforms) {
			self.captures.push(*sky);
		}
	}

	#[derive(Default)]
	struct CountingRedraw(Cell<u32>);

	impl Redraw for CountingRedraw {
		fn request_redraw(&self) {
			self.0.set(self.0.get() + 1);
		}
	}

	#[test]
	fn creation_captures_once() {
		let mut capture = RecordingCapture::default();
		let animator = SceneAnimator::new(&SkySettings::default(), &mut capture);

		assert_eq!(capture.captures.len(), 1);
		assert_eq!(
			capture.captures[0].sun_position,
			<[f32; 3]>::from(animator.sun.position)
		);
		assert_eq!(animator.time(), 0.0);
	}

	#[test]
	fn sun_change_captures_synchronously() {
		let mut capture = RecordingCapture::default();
		let mut animator = SceneAnimator::new(&SkySettings::default(), &mut capture);

		let sky = SkySettings {
			inclination: 0.0,
			azimuth: 0.5,
		};
		let sun = animator.recompute_sun(&sky, &mut capture);

		assert_eq!(capture.captures.len(), 2);
		assert_eq!(capture.captures[1].sun_position, [1.0, 0.0, 0.0]);
		assert_eq!(sun, animator.sun);
	}

	#[test]
	fn sun_placed_without_capture() {
		let mut capture = RecordingCapture::default();
		let mut animator = SceneAnimator::new(&SkySettings::default(), &mut capture);

		let sky = SkySettings {
			inclination: 0.4,
			azimuth: 0.7,
		};
		let sun = animator.place_sun(&sky);
		let uniforms = animator.uniforms(&WaterSettings::default());

		assert_eq!(capture.captures.len(), 1);
		assert_eq!(sun, Sun::new(0.4, 0.7));
		assert_eq!(uniforms.sky.sun_position, <[f32; 3]>::from(sun.position));
		assert_eq!(uniforms.water.sun_direction, <[f32; 3]>::from(sun.direction));
	}

	#[test]
	fn frames_do_not_capture() {
		let mut capture = RecordingCapture::default();
		let redraw = CountingRedraw::default();
		let mut animator = SceneAnimator::new(&SkySettings::default(), &mut capture);

		for _ in 0..100 {
			animator.advance_frame(&redraw);
		}

		assert_eq!(capture.captures.len(), 1);
		assert_eq!(redraw.0.get(), 100);
	}

	#[test]
	fn clock_advances_by_fixed_step() {
		let mut capture = RecordingCapture::default();
		let redraw = CountingRedraw::default();
		let mut animator = SceneAnimator::new(&SkySettings::default(), &mut capture);

		for n in 1..=600u64 {
			animator.advance_frame(&redraw);
			assert_eq!(animator.time(), n as f64 * FRAME_STEP);
		}
		assert_eq!(animator.frames(), 600);
		assert!((animator.time() - 10.0).abs() < 1e-12);
	}

	#[test]
	fn clock_ignores_wall_time() {
		let mut capture = RecordingCapture::default();
		let redraw = CountingRedraw::default();
		let mut slow = SceneAnimator::new(&SkySettings::default(), &mut capture);
		let mut fast = SceneAnimator::new(&SkySettings::default(), &mut capture);

		for _ in 0..3 {
			slow.advance_frame(&redraw);
			std::thread::sleep(std::time::Duration::from_millis(20));
		}
		for _ in 0..3 {
			fast.advance_frame(&redraw);
		}

		assert_eq!(slow.time(), fast.time());
		assert_eq!(slow.time(), 3.0 * FRAME_STEP);
	}

	#[test]
	fn frame_uniforms_follow_state() {
		let mut capture = RecordingCapture::default();
		let redraw = CountingRedraw::default();
		let mut animator = SceneAnimator::new(&SkySettings::default(), &mut capture);
		for _ in 0..60 {
			animator.advance_frame(&redraw);
		}

		let water = WaterSettings {
			size: 2.0,
			..Default::default()
		};
		let uniforms = animator.uniforms(&water);

		assert!((uniforms.water.time - 1.0).abs() < 1e-6);
		assert_eq!(uniforms.water.size, 2.0);
		assert_eq!(uniforms.water.sun_direction, <[f32; 3]>::from(animator.sun.direction));
		assert_eq!(uniforms.sky.sun_position, <[f32; 3]>::from(animator.sun.position));
	}
}
