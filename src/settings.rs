use std::ops::RangeInclusive;

use crate::util::{self, Reset};

pub const INCLINATION_RANGE: RangeInclusive<f32> = 0.0..=0.5;
pub const AZIMUTH_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const DISTORTION_SCALE_RANGE: RangeInclusive<f32> = 0.0..=8.0;
pub const SIZE_RANGE: RangeInclusive<f32> = 0.1..=10.0;
pub const ALPHA_RANGE: RangeInclusive<f32> = 0.9..=1.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SkySettings {
	pub inclination: f32,
	pub azimuth: f32,
}

impl Default for SkySettings {
	fn default() -> Self {
		Self {
			inclination: 0.25,
			azimuth: 0.05,
		}
	}
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaterSettings {
	pub distortion_scale: f32,
	pub size: f32,
	pub alpha: f32,
}

impl Default for WaterSettings {
	fn default() -> Self {
		Self {
			distortion_scale: 3.7,
			size: 1.0,
			alpha: 1.0,
		}
	}
}

/// What happened in the settings window during the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettingsResponse {
	pub focused: bool,
	pub sky_changed: bool,
	pub reset: bool,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
	pub sky: SkySettings,
	pub water: WaterSettings,

	#[serde(skip)]
	pub response: SettingsResponse,
	#[serde(skip)]
	reset_confirmation: bool,
}

impl Reset for Settings {}

fn clamp_into(name: &str, value: &mut f32, range: &RangeInclusive<f32>) -> bool {
	let clamped = if value.is_nan() {
		*range.start()
	} else {
		value.clamp(*range.start(), *range.end())
	};

	if clamped != *value {
		log::warn!("{name} = {value} is outside {range:?}, using {clamped}");
		*value = clamped;
		true
	} else {
		false
	}
}

impl Settings {
	/// Pulls values restored from storage back into the slider ranges.
	/// Returns whether anything had to be changed.
	pub fn clamp(&mut self) -> bool {
		let mut changed = false;
		changed |= clamp_into("inclination", &mut self.sky.inclination, &INCLINATION_RANGE);
		changed |= clamp_into("azimuth", &mut self.sky.azimuth, &AZIMUTH_RANGE);
		changed |= clamp_into(
			"distortion_scale",
			&mut self.water.distortion_scale,
			&DISTORTION_SCALE_RANGE,
		);
		changed |= clamp_into("size", &mut self.water.size, &SIZE_RANGE);
		changed |= clamp_into("alpha", &mut self.water.alpha, &ALPHA_RANGE);
		changed
	}

	pub fn window(&mut self, egui: &egui::Context) {
		let mut response = SettingsResponse::default();

		egui::Window::new("Parameters")
			.default_width(260.0)
			.resizable(false)
			.show(egui, |ui| {
				// {{{ sky
				egui::CollapsingHeader::new("Sky")
					.default_open(true)
					.show(ui, |ui| {
						for resp in [
							slider(ui, &mut self.sky.inclination, INCLINATION_RANGE, 0.0001, "inclination"),
							slider(ui, &mut self.sky.azimuth, AZIMUTH_RANGE, 0.0001, "azimuth"),
						] {
							response.focused |= resp.has_focus();
							response.sky_changed |= resp.changed();
						}
					});
				// }}}

				// {{{ water
				egui::CollapsingHeader::new("Water")
					.default_open(true)
					.show(ui, |ui| {
						for resp in [
							slider(
								ui,
								&mut self.water.distortion_scale,
								DISTORTION_SCALE_RANGE,
								0.1,
								"distortionScale",
							),
							slider(ui, &mut self.water.size, SIZE_RANGE, 0.1, "size"),
							slider(ui, &mut self.water.alpha, ALPHA_RANGE, 0.001, "alpha"),
						] {
							response.focused |= resp.has_focus();
						}
					});
				// }}}

				ui.separator();
				if ui.button("Reset").clicked() {
					self.reset_confirmation = true;
				}
			});

		// {{{ reset confirmation
		let mut confirmed = false;
		util::modal(
			egui,
			"Reset parameters",
			&mut self.reset_confirmation,
			|ui| {
				ui.label("Restore the default sky and water parameters?");
			},
			util::red_hover_button,
			|| confirmed = true,
		);

		if confirmed {
			log::info!("resetting parameters to defaults");
			self.reset();
			response.reset = true;
			response.sky_changed = true;
		}
		// }}}

		self.response = response;
	}
}

fn slider(
	ui: &mut egui::Ui,
	value: &mut f32,
	range: RangeInclusive<f32>,
	step: f64,
	label: &str,
) -> egui::Response {
	ui.add(egui::Slider::new(value, range).step_by(step).text(label))
}
