//! Formatação em texto da tabela de sensores e dos snapshots.

use thermals_core::snapshot::format_value;
use thermals_core::types::SensorSource;
use thermals_core::{DeviceClass, MetricTable, Snapshot, TemperatureUnit};

/// Uma linha por instância descoberta, agrupada por dispositivo.
pub fn table_lines(table: &MetricTable) -> Vec<String> {
    let mut lines = Vec::new();
    for device in table.devices() {
        lines.push(format!(
            "{} #{} – {} ({})",
            device.class,
            device.index,
            device.name,
            device.dir.display()
        ));
        let paths = table
            .paths()
            .filter(|p| p.device_class() == device.class && p.id.device_index == device.index);
        for path in paths {
            let source = match &path.source {
                SensorSource::File(file) => file.display().to_string(),
                SensorSource::Mean(files) => format!("média de {} cores", files.len()),
            };
            lines.push(format!("    {:<24} {:<12} {source}", path.id.to_string(), path.label));
        }
    }
    lines
}

/// Resumo de uma linha por classe, ex: "CPU Package 45.0°C | GPU Hotspot 63.0°C".
pub fn summary_line(snapshot: &Snapshot, unit: TemperatureUnit) -> String {
    let parts: Vec<String> = [DeviceClass::Cpu, DeviceClass::Gpu, DeviceClass::Nvme, DeviceClass::Unknown]
        .into_iter()
        .flat_map(|class| snapshot.of_class(class))
        .filter(|r| r.metric().is_temperature())
        .map(|r| {
            let stale = if r.stale { "*" } else { "" };
            format!(
                "{} {}{stale}",
                r.display_name(),
                r.format(r.state.current, unit)
            )
        })
        .collect();

    if parts.is_empty() {
        "nenhum sensor disponível".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Tabela completa Sensor/Current/Min/Max/Crit.
pub fn snapshot_lines(snapshot: &Snapshot, unit: TemperatureUnit) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<32} {:>12} {:>12} {:>12} {:>12}",
        "Sensor", "Current", "Min", "Max", "Crit"
    )];
    for r in snapshot.iter() {
        let metric = r.metric();
        let marker = if r.stale { " (stale)" } else { "" };
        lines.push(format!(
            "{:<32} {:>12} {:>12} {:>12} {:>12}{marker}",
            r.display_name(),
            r.format(r.state.current, unit),
            r.format(r.state.minimum, unit),
            r.format(r.state.maximum, unit),
            format_value(metric, r.critical, unit),
        ));
    }
    lines
}
