use crate::XenEditApp;
use crate::canvas::Surface;
use crate::geometry::Point;

pub fn central_panel(app: &mut XenEditApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let (width, height) = app.engine().surface().size();
            let (response, painter) = ui.allocate_painter(
                egui::vec2(width as f32, height as f32),
                egui::Sense::drag(),
            );
            let canvas_rect = response.rect;

            // Handle input
            let pointer = response
                .interact_pointer_pos()
                .map(|pos| {
                    let local = pos - canvas_rect.min;
                    Point::new(local.x.round() as i32, local.y.round() as i32)
                })
                .or(app.last_pointer());
            if let Some(at) = pointer {
                app.handle_pointer(at, &response);
            }

            // Render the canvas
            app.render(ctx, &painter, canvas_rect);
        });
    });
}
