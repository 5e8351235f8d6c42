use std::sync::Arc;

use egui::mutex::Mutex;

use crate::{
	animator::SceneAnimator,
	camera::OrbitCamera,
	render::{GlEnvironment, Renderer},
	scene::Scene,
	settings::Settings,
	stats::FrameStats,
};

pub struct FjordApp {
	pub renderer: Arc<Mutex<Renderer>>,

	settings: Settings,
	animator: SceneAnimator,
	stats: FrameStats,
}

const DATA_KEY: &str = "fjord_settings";

impl FjordApp {
	pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
		let scr_size = cc.egui_ctx.screen_rect().size();
		let scr_size = [scr_size.x.max(1.0), scr_size.y.max(1.0)];

		// {{{ restore settings
		let mut settings = Settings::default();

		if let Some(storage) = cc.storage {
			if let Some(value) = eframe::get_value::<Settings>(storage, DATA_KEY) {
				log::debug!("restored settings: {:?} {:?}", value.sky, value.water);
				settings = value;
			}
		}
		settings.clamp();
		// }}}

		// obtain contexts
		let gl = cc.gl.as_ref().expect("obtaining GL context failed");
		let egui = &cc.egui_ctx;

		// {{{ reduce window shadow size
		egui.set_visuals(egui::Visuals {
			window_shadow: egui::epaint::Shadow {
				offset: egui::Vec2::splat(0.0),
				blur: 16.0,
				color: egui::Color32::from_black_alpha(64),
				..Default::default()
			},
			..Default::default()
		});
		// }}}

		// reset window positions
		egui.memory_mut(|mem| mem.reset_areas());

		let scene = Scene::default();
		let mut renderer = Renderer::new(gl, &scene, OrbitCamera::new(scr_size))
			.unwrap_or_else(|err| panic!("initializing renderer failed: {err}"));

		let animator = SceneAnimator::new(
			&settings.sky,
			&mut GlEnvironment {
				renderer: &mut renderer,
				gl,
			},
		);

		Self {
			renderer: Arc::new(Mutex::new(renderer)),
			settings,
			animator,
			stats: FrameStats::default(),
		}
	}
}

impl eframe::App for FjordApp {
	fn save(&mut self, storage: &mut dyn eframe::Storage) {
		eframe::set_value(storage, DATA_KEY, &self.settings);
	}

	fn update(&mut self, egui: &egui::Context, frame: &mut eframe::Frame) {
		self.stats.tick();

		// {{{ draw windows
		self.settings.window(egui);
		self.stats.window(egui);
		let response = self.settings.response;
		// }}}

		// {{{ respond
		if response.sky_changed || response.reset {
			let mut renderer = self.renderer.lock();

			if response.reset {
				renderer.camera.reset_view();
			}

			let sun = match frame.gl() {
				Some(gl) => self.animator.recompute_sun(
					&self.settings.sky,
					&mut GlEnvironment {
						renderer: &mut renderer,
						gl,
					},
				),
				None => {
					log::warn!("no GL context, environment map left stale");
					self.animator.place_sun(&self.settings.sky)
				}
			};
			log::debug!("sun elevation {:.3}", sun.elevation());
		}
		// }}}

		self.animator.advance_frame(egui);
		let uniforms = self.animator.uniforms(&self.settings.water);

		// main painting
		egui::CentralPanel::default()
			.frame(egui::Frame::none())
			.show(egui, |ui| {
				self.paint(ui, uniforms, response.focused);
			});
	}

	fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
		if let Some(gl) = gl {
			let renderer = self.renderer.lock();
			log::info!(
				"shutting down after {} frames, {} environment captures",
				self.animator.frames(),
				renderer.environment_captures()
			);
			renderer.destroy(gl);
		}
	}
}
