use eframe::egui;
use shapepad::canvas::{PointerButton, PointerEvent, PointerEventKind};
use shapepad::geometry::Point;
use shapepad::tool::Tool;

use super::ShapeApp;
use super::render::{color_row, draw_background, draw_canvas, tool_button};

impl eframe::App for ShapeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();
        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                self.save_json_dialog();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                self.open_json_dialog();
            }
            if wants_keyboard {
                return;
            }
            let shortcuts = [
                (egui::Key::C, Tool::Circle),
                (egui::Key::R, Tool::Rectangle),
                (egui::Key::P, Tool::Polygon),
                (egui::Key::E, Tool::Edit),
            ];
            for (key, tool) in shortcuts {
                if i.consume_key(egui::Modifiers::NONE, key) {
                    self.canvas.select_tool(tool);
                }
            }
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open... (⌘O)").clicked() {
                        self.open_json_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Save... (⌘S)").clicked() {
                        self.save_json_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.small("Quick save path:");
                    if ui.text_edit_singleline(&mut self.file_path).lost_focus() {
                        self.persist_settings();
                    }
                    if ui.small_button("Quick Save").clicked() {
                        self.save_to_path();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Clear").clicked() {
                        self.clear_canvas();
                        ui.close_menu();
                    }
                });
                ui.separator();
                for tool in Tool::ALL {
                    tool_button(ui, tool, &mut self.canvas);
                }
                ui.separator();
                ui.label("Fill");
                if color_row(ui, &mut self.fill) {
                    log::debug!("fill color set to {}", self.fill);
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let cursor = self.canvas.cursor_display();
                ui.label(format!("{:.0} : {:.0}", cursor.x, cursor.y));
                ui.separator();
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Shapes: {}", self.canvas.shapes().len()));
                    ui.separator();
                    let tool = self
                        .canvas
                        .current_tool()
                        .map_or("none", |tool| tool.label());
                    ui.label(format!("Tool: {tool}"));
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                let origin = rect.min;

                let hover = ctx
                    .input(|i| i.pointer.hover_pos())
                    .filter(|p| rect.contains(*p) && response.contains_pointer());
                let local = hover.map(|p| Point::new(p.x - origin.x, p.y - origin.y));
                self.forward_pointer(ctx, local);

                let painter = ui.painter_at(rect);
                draw_background(&painter, rect);
                draw_canvas(&painter, origin, &self.canvas);
            });

        self.drain_diagnostics();
    }
}

impl ShapeApp {
    /// Translates this frame's egui pointer state into canvas events.
    fn forward_pointer(&mut self, ctx: &egui::Context, local: Option<Point>) {
        let Some(pos) = local else {
            if self.last_pointer.take().is_some() {
                self.canvas.handle(PointerEvent::exited(), &self.fill);
            }
            return;
        };

        let (primary_down, primary_pressed, primary_released, secondary_pressed, scroll) =
            ctx.input(|i| {
                (
                    i.pointer.primary_down(),
                    i.pointer.primary_pressed(),
                    i.pointer.primary_released(),
                    i.pointer.secondary_pressed(),
                    i.raw_scroll_delta.y,
                )
            });

        if self.last_pointer != Some(pos) {
            let kind = if primary_down && !primary_pressed {
                PointerEventKind::Drag(PointerButton::Primary)
            } else {
                PointerEventKind::Move
            };
            self.canvas.handle(PointerEvent::new(pos.x, pos.y, kind), &self.fill);
            self.last_pointer = Some(pos);
        }
        if primary_pressed {
            self.canvas.handle(PointerEvent::pressed(pos.x, pos.y), &self.fill);
        }
        if secondary_pressed {
            self.canvas
                .handle(PointerEvent::secondary_pressed(pos.x, pos.y), &self.fill);
        }
        if primary_released {
            self.canvas.handle(PointerEvent::released(pos.x, pos.y), &self.fill);
        }
        if scroll.abs() > 0.0 {
            self.canvas
                .handle(PointerEvent::scrolled(pos.x, pos.y, scroll), &self.fill);
        }
    }
}
