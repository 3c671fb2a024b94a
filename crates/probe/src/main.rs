//! # LX Thermals Probe
//!
//! Descobre os sensores hwmon e registra snapshots periódicos no log, sem
//! interface gráfica.
//!
//! ## Uso
//! ```bash
//! thermals_probe                     # Loga um resumo a cada ciclo
//! thermals_probe --list              # Lista os sensores descobertos e sai
//! thermals_probe --once              # Imprime um snapshot completo e sai
//! thermals_probe --config cfg.toml   # Usa outro arquivo de configuração
//! ```

mod report;

use std::path::PathBuf;
use std::time::Instant;
use thermals_core::alerts::evaluate_alerts;
use thermals_core::config::AppConfig;
use thermals_core::hardware;
use thermals_core::{Severity, ThermalEngine, Ticker};
use tracing::{error, info, warn};

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let list_only = args.iter().any(|a| a == "--list");
    let once = args.iter().any(|a| a == "--once");
    let explicit_config = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    // ── Carregar config ──
    let config = match &explicit_config {
        Some(path) => match AppConfig::load_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Config inválida em {}: {e}", path.display());
                std::process::exit(2);
            }
        },
        None => {
            let path = AppConfig::default_path();
            let config = AppConfig::load(&path);
            // Salva config padrão se não existir
            if !path.exists() {
                if let Err(e) = config.save(&path) {
                    warn!("Não foi possível salvar config padrão: {e}");
                }
            }
            config
        }
    };
    let unit = config.display.temperature_unit;

    // ── Descoberta ──
    let mut engine = ThermalEngine::from_app_config(&config);
    let devices = match engine.discover() {
        Ok(n) => n,
        Err(e) => {
            error!("Nenhum sensor disponível: {e}");
            0
        }
    };

    if list_only {
        for line in report::table_lines(engine.table()) {
            println!("{line}");
        }
        return;
    }

    if once {
        let snapshot = engine.tick();
        for line in report::snapshot_lines(&snapshot, unit) {
            println!("{line}");
        }
        return;
    }

    // ── Banner ──
    let mut gpus: Vec<_> = hardware::gpu_names(engine.table(), &config.engine.pci_ids)
        .into_values()
        .collect();
    if gpus.is_empty() {
        gpus.push(hardware::gpu_name(&config.engine.drm_root, &config.engine.pci_ids));
    }
    println!();
    println!("══════════════════════════════════════════════");
    println!("   🌡  LX THERMALS PROBE – ATIVO");
    println!("══════════════════════════════════════════════");
    println!("  CPU:         {}", hardware::cpu_model_name());
    for gpu in &gpus {
        println!("  GPU:         {}{}", gpu.name, if gpu.known { "" } else { " (não listada no pci.ids)" });
    }
    println!("  Dispositivos: {devices}");
    println!("  Intervalo:   {} ms", config.display.poll_interval_ms);
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    let mut ticker = Ticker::new(config.poll_interval());
    loop {
        if let Some(_guard) = ticker.try_begin(Instant::now()) {
            let snapshot = engine.tick();
            info!("{}", report::summary_line(&snapshot, unit));

            for alert in evaluate_alerts(&snapshot) {
                let value = thermals_core::snapshot::format_value(alert.id.metric, Some(alert.value), unit);
                match alert.level {
                    Severity::Critical => error!("CRÍTICO: {} = {value}", alert.label),
                    _ => warn!("Atenção: {} = {value}", alert.label),
                }
            }
        }

        // Dormir até o próximo ciclo
        std::thread::sleep(ticker.time_until_due(Instant::now()));
    }
}
