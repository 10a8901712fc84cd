use crate::XenEditApp;
use crate::tools::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, Tool};
use egui;

pub fn tools_panel(app: &mut XenEditApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.engine().tools().active_tool();
            for tool in Tool::ALL.into_iter().filter(|tool| *tool != Tool::Crop) {
                if ui.selectable_label(active == tool, tool.label()).clicked() {
                    app.engine_mut().set_tool(tool);
                }
            }
            ui.separator();

            // Color picker
            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.engine().tools().color();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.engine_mut().set_color(color);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Hex:");
                let response = ui.add(egui::TextEdit::singleline(app.hex_input_mut()).desired_width(80.0));
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    app.apply_hex_input();
                }
            });
            if app.engine().tools().is_erasing() {
                ui.weak("Erasing with the background color");
            }

            // Brush size slider
            ui.horizontal(|ui| {
                ui.label("Size:");
                let mut width = app.engine().tools().stroke_width();
                if ui
                    .add(egui::Slider::new(&mut width, MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH))
                    .changed()
                {
                    app.engine_mut().set_stroke_width(width);
                }
            });
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.engine().can_undo();
                let can_redo = app.engine().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.engine_mut().undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.engine_mut().redo();
                }
            });
            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", app.engine().undo_len()));
                ui.label(format!("Redo stack size: {}", app.engine().redo_len()));
            });
            ui.separator();

            if ui
                .selectable_label(active == Tool::Crop, Tool::Crop.label())
                .clicked()
            {
                app.engine_mut().set_tool(Tool::Crop);
            }
            if ui.button("💾 Export").clicked() {
                app.export();
            }

            ui.separator();
            ui.label(format!("Gesture: {}", app.engine().gesture().name()));
        });
}
