use std::collections::VecDeque;

use web_time::{Duration, Instant};

const WINDOW: usize = 60;

/// Frame time overlay, averaged over the last [`WINDOW`] frames.
pub struct FrameStats {
	last: Option<Instant>,
	samples: VecDeque<Duration>,
}

impl Default for FrameStats {
	fn default() -> Self {
		Self {
			last: None,
			samples: VecDeque::with_capacity(WINDOW),
		}
	}
}

impl FrameStats {
	pub fn tick(&mut self) {
		let now = Instant::now();
		if let Some(last) = self.last.replace(now) {
			self.record(now - last);
		}
	}

	fn record(&mut self, frame_time: Duration) {
		if self.samples.len() == WINDOW {
			self.samples.pop_front();
		}
		self.samples.push_back(frame_time);
	}

	pub fn mean_frame_time(&self) -> Option<Duration> {
		if self.samples.is_empty() {
			return None;
		}
		Some(self.samples.iter().sum::<Duration>() / self.samples.len() as u32)
	}

	pub fn fps(&self) -> Option<f32> {
		self.mean_frame_time()
			.filter(|t| !t.is_zero())
			.map(|t| 1.0 / t.as_secs_f32())
	}

	pub fn window(&self, egui: &egui::Context) {
		egui::Window::new("Stats")
			.title_bar(false)
			.resizable(false)
			.anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
			.show(egui, |ui| match (self.fps(), self.mean_frame_time()) {
				(Some(fps), Some(t)) => {
					ui.monospace(format!("{fps:5.1} FPS"));
					ui.monospace(format!("{:5.2} ms", t.as_secs_f64() * 1000.0));
				}
				_ => {
					ui.monospace("  --- FPS");
				}
			});
	}
}
