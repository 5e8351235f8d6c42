use egui::{Color32, Ui};

// {{{ UI
pub fn red_hover_button(ui: &mut Ui) {
	ui.visuals_mut().widgets.hovered.weak_bg_fill =
		Color32::from_rgb(240, 84, 84);
	ui.visuals_mut().widgets.hovered.bg_stroke.color =
		Color32::from_rgb(240, 84, 84);
	ui.visuals_mut().widgets.hovered.fg_stroke.color =
		Color32::from_rgb(10, 10, 10);
}

// {{{ modal
pub fn modal(
	egui: &egui::Context,
	title: impl Into<egui::WidgetText>,
	cond: &mut bool,
	pre_ui: impl FnOnce(&mut Ui),
	mid_ui: impl FnOnce(&mut Ui),
	confirm_callback: impl FnOnce(),
) {
	if *cond {
		egui::Window::new(title)
			.collapsible(false)
			.resizable(false)
			.anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
			.show(egui, |ui| {
				pre_ui(ui);

				ui.horizontal(|ui| {
					if ui.button("Cancel").highlight().clicked() {
						*cond = false;
					}

					mid_ui(ui);

					if ui.button("Confirm").clicked() {
						*cond = false;
						confirm_callback();
					}
				});
			});
	}
}
// }}}
// }}}

pub trait Reset {
	fn reset(&mut self) where Self: Default {
		*self = Self::default();
	}
}
