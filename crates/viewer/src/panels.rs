//! Painéis por dispositivo renderizados com egui.

use crate::theme_egui::EguiTheme;
use egui::{Color32, RichText, Ui};
use thermals_core::snapshot::{InstanceReading, format_value};
use thermals_core::{DeviceClass, TemperatureUnit};

/// Leituras de um dispositivo físico, prontas para um painel.
pub struct DevicePanel<'a> {
    pub class: DeviceClass,
    pub index: u32,
    pub title: String,
    /// Texto ao passar o mouse sobre o título
    pub title_hint: Option<String>,
    pub accent: Color32,
    pub readings: Vec<&'a InstanceReading>,
}

// ──────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────

fn panel_frame(
    ui: &mut Ui,
    title: &str,
    title_hint: Option<&str>,
    accent: Color32,
    theme: &EguiTheme,
    add_body: impl FnOnce(&mut Ui),
) {
    egui::Frame::new()
        .fill(theme.panel)
        .stroke(egui::Stroke::new(2.0, accent))
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                let response = ui.label(
                    RichText::new(format!("── {title} ──"))
                        .color(accent)
                        .strong()
                        .monospace()
                        .size(13.0),
                );
                if let Some(hint) = title_hint {
                    response.on_hover_text(hint);
                }
            });
            ui.add_space(4.0);
            add_body(ui);
        });
}

fn cell(ui: &mut Ui, text: String, color: Color32) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
        ui.label(RichText::new(text).color(color).monospace());
    });
}

// ──────────────────────────────────────────
// Painel de dispositivo
// ──────────────────────────────────────────

/// Grade Sensor | Current | Min | Max | Crit de um dispositivo.
pub fn render_device(ui: &mut Ui, panel: &DevicePanel<'_>, theme: &EguiTheme, unit: TemperatureUnit) {
    let hint = panel.title_hint.as_deref();
    panel_frame(ui, &panel.title, hint, panel.accent, theme, |ui: &mut Ui| {
        if panel.readings.is_empty() {
            ui.label(RichText::new("Sem sensores").color(theme.dim).monospace());
            return;
        }

        egui::Grid::new(("grid", panel.class, panel.index))
            .num_columns(5)
            .striped(true)
            .spacing([12.0, 2.0])
            .show(ui, |ui: &mut Ui| {
                for header in ["Sensor", "Current", "Min", "Max", "Crit"] {
                    ui.label(RichText::new(header).color(theme.dim).monospace().size(11.0));
                }
                ui.end_row();

                for reading in &panel.readings {
                    render_row(ui, reading, theme, unit);
                    ui.end_row();
                }
            });
    });
}

fn render_row(ui: &mut Ui, reading: &InstanceReading, theme: &EguiTheme, unit: TemperatureUnit) {
    let state = &reading.state;
    ui.label(RichText::new(reading.sensor_name()).color(theme.dim).monospace());

    let mut current = reading.format(state.current, unit);
    if reading.stale && state.has_reading() {
        current.push_str(" ⚠");
    }
    let response = ui
        .with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.label(
                RichText::new(current)
                    .color(theme.reading_color(reading))
                    .monospace()
                    .strong(),
            )
        })
        .inner;
    if reading.stale {
        response.on_hover_text("Última leitura falhou; exibindo o último valor válido");
    }

    cell(ui, reading.format(state.minimum, unit), theme.text);
    cell(ui, reading.format(state.maximum, unit), theme.text);
    cell(ui, format_value(reading.metric(), reading.critical, unit), theme.dim);
}
