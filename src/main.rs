#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use fjord::FjordApp;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
	env_logger::init();

	let native_options = eframe::NativeOptions {
		viewport: egui::ViewportBuilder::default()
			.with_inner_size([1280.0, 720.0])
			.with_min_inner_size([400.0, 300.0]),
		depth_buffer: 24,
		..Default::default()
	};
	eframe::run_native(
		"Fjord",
		native_options,
		Box::new(|cc| Box::new(FjordApp::new(cc))),
	)
}

#[cfg(target_arch = "wasm32")]
fn main() {
	eframe::WebLogger::init(log::LevelFilter::Debug).ok();

	let web_options = eframe::WebOptions {
		depth_buffer: 24,
		..Default::default()
	};

	wasm_bindgen_futures::spawn_local(async {
		eframe::WebRunner::new()
			.start(
				"the_canvas_id",
				web_options,
				Box::new(|cc| Box::new(FjordApp::new(cc))),
			)
			.await
			.expect("starting eframe failed");
	});
}
