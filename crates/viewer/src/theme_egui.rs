//! Conversão de temas para `egui::Color32`.

use egui::Color32;
use thermals_core::snapshot::InstanceReading;
use thermals_core::theme::{self, Theme};
use thermals_core::{DeviceClass, Severity};

/// Tema convertido para tipos egui.
#[derive(Clone)]
pub struct EguiTheme {
    pub name: String,
    pub bg: Color32,
    pub panel: Color32,
    pub border: Color32,
    pub text: Color32,
    pub dim: Color32,
    pub title: Color32,
    pub cpu: Color32,
    pub gpu: Color32,
    pub nvme: Color32,
    pub other: Color32,
    pub warning: Color32,
    pub critical: Color32,
    pub stale: Color32,
}

impl EguiTheme {
    /// Converte um [`Theme`] do core para [`EguiTheme`].
    pub fn from_core(t: &Theme) -> Self {
        Self {
            name: t.name.clone(),
            bg: hex_color(&t.bg),
            panel: hex_color(&t.panel),
            border: hex_color(&t.border),
            text: hex_color(&t.text),
            dim: hex_color(&t.dim),
            title: hex_color(&t.title),
            cpu: hex_color(&t.cpu),
            gpu: hex_color(&t.gpu),
            nvme: hex_color(&t.nvme),
            other: hex_color(&t.other),
            warning: hex_color(&t.warning),
            critical: hex_color(&t.critical),
            stale: hex_color(&t.stale),
        }
    }

    pub fn class_color(&self, class: DeviceClass) -> Color32 {
        match class {
            DeviceClass::Cpu => self.cpu,
            DeviceClass::Gpu => self.gpu,
            DeviceClass::Nvme => self.nvme,
            DeviceClass::Unknown => self.other,
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color32 {
        match severity {
            Severity::Normal => self.text,
            Severity::Warning => self.warning,
            Severity::Critical => self.critical,
        }
    }

    /// Cor do valor corrente: stale tem prioridade sobre a severidade.
    pub fn reading_color(&self, reading: &InstanceReading) -> Color32 {
        if reading.stale {
            self.stale
        } else {
            self.severity_color(reading.severity)
        }
    }
}

fn hex_color(hex: &str) -> Color32 {
    let (r, g, b) = theme::hex_to_rgb(hex);
    Color32::from_rgb(r, g, b)
}

/// Carrega todos os temas disponíveis.
pub fn all_themes() -> Vec<EguiTheme> {
    theme::theme_names()
        .iter()
        .map(|name| EguiTheme::from_core(&theme::get_theme(name)))
        .collect()
}
