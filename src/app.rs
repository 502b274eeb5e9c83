use egui::{Color32, Sense, TextureHandle, TextureOptions, Vec2};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::{BrushSettings, CanvasConfig};
use crate::engine::Tool;
use crate::input::{CanvasTransform, InputHandler};
use crate::surface::{CanvasHandle, DrawingSurface};

/// Host-side settings persisted between runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DoodleSettings {
    pub config: CanvasConfig,
    pub brush: BrushSettings,
    pub tool: Tool,
}

/// Demo host: shows one drawing surface and wires egui input into it
pub struct DoodleApp {
    surface: DrawingSurface,
    input: InputHandler,
    texture: Option<TextureHandle>,
    /// Snapshot and active-stroke length the texture was last rendered from
    rendered: Option<(Uuid, usize)>,
    export_path: PathBuf,
    status: String,
}

impl DoodleApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<CanvasConfig>) -> Self {
        let mut settings: DoodleSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        if let Some(config) = config {
            settings.config = config;
        }
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: DoodleSettings) -> Self {
        let surface = DrawingSurface::new(settings.config).unwrap_or_else(|err| {
            log::warn!("{}; falling back to the default canvas", err);
            DrawingSurface::default()
        });
        let mut app = Self {
            input: InputHandler::new(CanvasTransform::new(egui::Rect::NOTHING, surface.config())),
            surface,
            texture: None,
            rendered: None,
            export_path: PathBuf::from("drawing.png"),
            status: String::new(),
        };
        app.surface.set_brush(settings.brush);
        app.surface.set_tool(settings.tool);
        app
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    fn settings(&self) -> DoodleSettings {
        DoodleSettings {
            config: *self.surface.config(),
            brush: *self.surface.brush(),
            tool: self.surface.tool(),
        }
    }

    fn export(&mut self) {
        self.status = match self
            .surface
            .request_image_export()
            .and_then(|image| image.save(&self.export_path))
        {
            Ok(()) => format!("Saved {}", self.export_path.display()),
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Export failed: {}", err)
            }
        };
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        ui.separator();

        ui.horizontal(|ui| {
            for tool in Tool::ALL {
                if ui.selectable_label(self.surface.tool() == tool, tool.name()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    self.surface.set_tool(tool);
                }
            }
        });

        ui.separator();

        let mut color = self.surface.brush().color32();
        ui.horizontal(|ui| {
            ui.label("Color:");
            egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::OnlyBlend,
            );
        });
        if color != self.surface.brush().color32() {
            self.surface.set_color(color);
        }

        let mut width = self.surface.brush().width;
        ui.horizontal(|ui| {
            ui.label("Width:");
            ui.add(egui::Slider::new(&mut width, 1.0..=50.0));
        });
        self.surface.set_brush_width(width);

        ui.separator();

        ui.horizontal(|ui| {
            let history = self.surface.history();
            let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                let _ = self.surface.undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                let _ = self.surface.redo();
            }
            if ui.button("Clear").clicked() {
                self.surface.clear_all();
            }
        });

        if ui.button("Export PNG").clicked() {
            self.export();
        }

        ui.separator();
        let history = self.surface.history();
        ui.label(format!("History: {} / {}", history.cursor() + 1, history.len()));
        if !self.status.is_empty() {
            ui.label(&self.status);
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let key = (
            self.surface.current().id(),
            self.surface.active_stroke_len(),
        );
        if self.rendered == Some(key) && self.texture.is_some() {
            return;
        }

        let image = self.surface.preview().to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
            }
        }
        self.rendered = Some(key);
    }
}

impl eframe::App for DoodleApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("tools_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| self.tools_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(60)))
            .show(ctx, |ui| {
                let config = self.surface.config();
                let canvas_size = Vec2::new(config.width as f32, config.height as f32);
                let available = ui.available_size();
                let scale = (available.x / canvas_size.x)
                    .min(available.y / canvas_size.y)
                    .clamp(0.1, 1.0);

                let (rect, response) = ui.allocate_exact_size(canvas_size * scale, Sense::drag());
                self.input.set_screen_rect(rect);

                // Popups such as the color picker can overlap the canvas
                for event in self.input.process_input(ctx, response.hovered()) {
                    let _ = self.surface.handle_event(event);
                }

                self.refresh_texture(ctx);
                if let Some(texture) = &self.texture {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
            });
    }
}
