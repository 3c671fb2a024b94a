//! # LX Thermals
//!
//! Temperaturas, clocks e fans de CPU, GPU e NVMe lidos do hwmon do Linux,
//! com mínimo/máximo por sensor, em uma janela eframe/egui.
//!
//! ## Atalhos
//! - `R`: Resetar min/max
//! - `S`: Nova varredura de sensores
//! - `G`: Toggle gráficos
//! - `T`: Alternar tema
//! - `F` / `F11`: Fullscreen
//! - `Q` / `Esc`: Sair

mod dashboard;
mod panels;
mod scan_thread;
mod theme_egui;

use dashboard::ThermalsDashboard;
use thermals_core::config::AppConfig;
use tracing::warn;

fn main() -> eframe::Result<()> {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    // ── Janela eframe ──
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("LX Thermals")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LX Thermals",
        options,
        Box::new(move |cc| Ok(Box::new(ThermalsDashboard::new(cc, config)))),
    )
}
