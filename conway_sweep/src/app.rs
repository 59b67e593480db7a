// app.rs - eframe host: controls, live editing and painting around the sweep engine

use std::time::Instant;

use conway::{patterns, SweepEngine};
use eframe::egui;
use egui::{Color32, RichText};

use crate::driver::{self, Driver, SharedEngine};
use crate::input::{self, Command, HoverEditor};
use crate::settings::AppConfig;
use crate::view::{self, Palette};

pub struct SweepApp {
    engine: SharedEngine,
    // Declared before the runtime so the clock task is aborted first
    driver: Driver,
    _runtime: tokio::runtime::Runtime,
    hover: HoverEditor,
    palette: Palette,
    cell_px: f32,
    selected_pattern: usize,
}

impl SweepApp {
    pub fn new(config: &AppConfig, engine: SweepEngine, runtime: tokio::runtime::Runtime) -> Self {
        let engine = driver::share(engine);
        let driver = Driver::spawn(
            runtime.handle(),
            engine.clone(),
            config.tick_interval(),
            !config.start_paused,
        );

        Self {
            engine,
            driver,
            _runtime: runtime,
            hover: HoverEditor::default(),
            palette: Palette::default(),
            cell_px: config.cell_px,
            selected_pattern: 0,
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => {
                self.driver.toggle();
            }
            Command::Reseed => driver::lock(&self.engine).seed(),
            Command::Clear => driver::lock(&self.engine).clear(),
            Command::Faster => {
                driver::lock(&self.engine).double_speed();
            }
            Command::Slower => {
                driver::lock(&self.engine).halve_speed();
            }
            Command::ResetSpeed => {
                driver::lock(&self.engine).reset_speed();
            }
            Command::Preset(preset) => {
                driver::lock(&self.engine).apply_preset(preset);
            }
        }
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            self.driver.pause();
            driver::lock(&self.engine).load_pattern(pattern);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) -> Vec<Command> {
        let mut commands = Vec::new();

        ui.horizontal(|ui| {
            let button_text = if self.driver.is_running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                commands.push(Command::TogglePause);
            }
            if ui.button("🎲 Reseed").clicked() {
                commands.push(Command::Reseed);
            }
            if ui.button("⏹ Clear").clicked() {
                commands.push(Command::Clear);
            }

            ui.separator();

            ui.label("Speed:");
            if ui.button("▼").clicked() {
                commands.push(Command::Slower);
            }
            if ui.button("▲").clicked() {
                commands.push(Command::Faster);
            }
            if ui.button("reset").clicked() {
                commands.push(Command::ResetSpeed);
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.button("Apply Pattern").clicked() {
                self.apply_selected_pattern();
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.palette.live);
            ui.label("Trail:");
            ui.color_edit_button_srgba(&mut self.palette.trail);
        });

        commands
    }
}

impl eframe::App for SweepApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for command in input::pressed_commands(ctx) {
            self.apply(command);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Conway's Game of Life (Sweep)");
            for command in self.controls(ui) {
                self.apply(command);
            }
            ui.label(
                RichText::new(
                    "hover to flip cells · click or [Space] pause/resume · [R] reseed · [C] clear · \
                     [▲/▼] speed · [0] reset · [1][2][3] presets",
                )
                .monospace()
                .small()
                .color(Color32::from_rgb(110, 231, 183)),
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (cols, rows) = {
                let engine = driver::lock(&self.engine);
                (engine.cols(), engine.rows())
            };
            let size = view::grid_size(self.cell_px, cols, rows);

            let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
            let origin = response.rect.min;

            // Edits land before this frame's snapshot is taken
            let hovered = response
                .hover_pos()
                .and_then(|pos| input::cell_at(pos, origin, self.cell_px, cols, rows));
            if let Some(i) = self.hover.update(hovered) {
                if let Err(e) = driver::lock(&self.engine).toggle_cell(i) {
                    log::warn!("hover edit ignored: {}", e);
                }
            }
            if response.clicked() {
                self.apply(Command::TogglePause);
            }

            let snapshot = driver::lock(&self.engine).snapshot(Instant::now());
            view::paint(&painter, origin, self.cell_px, &snapshot, &self.palette);

            ui.separator();

            ui.label(
                RichText::new(view::status_line(&snapshot, self.driver.is_running())).monospace(),
            );
            let total = snapshot.cells.len();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", snapshot.population));
                ui.label(format!("Dead cells: {}", total - snapshot.population));
                ui.label(format!(
                    "Population: {:.1}%",
                    snapshot.population as f32 / total as f32 * 100.0
                ));
            });

            // Keep animating while the clock runs or the trail is still fading
            if self.driver.is_running() {
                ctx.request_repaint_after(self.driver.cadence());
            } else if !snapshot.trail.is_empty() {
                ctx.request_repaint();
            }
        });
    }
}
