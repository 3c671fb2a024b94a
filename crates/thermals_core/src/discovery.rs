//! Descoberta de sensores na árvore hwmon.
//!
//! Percorre `/sys/class/hwmon/*`, classifica cada dispositivo pelo `name` e
//! monta a [`MetricTable`]. Dispositivos ilegíveis são ignorados; só a raiz
//! ausente é erro.
//!
//! A numeração `hwmonN` não é estável entre boots, então a ordem dos
//! dispositivos vem de (classe, nome, link `device`) e nunca do diretório.

use crate::classify::{self, DevicePattern};
use crate::config::EngineConfig;
use crate::reader::{self, read_trimmed};
use crate::table::MetricTable;
use crate::types::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_HWMON_ROOT: &str = "/sys/class/hwmon";
pub const DEFAULT_CPUFREQ_ROOT: &str = "/sys/devices/system/cpu";

/// Falha da descoberta como um todo.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("raiz hwmon {path} indisponível: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Tipo de entrada numérica do hwmon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum InputKind {
    Temp,
    Freq,
    Fan,
}

impl InputKind {
    fn prefix(self) -> &'static str {
        match self {
            InputKind::Temp => "temp",
            InputKind::Freq => "freq",
            InputKind::Fan => "fan",
        }
    }

    fn scale(self) -> f64 {
        match self {
            InputKind::Temp => MILLIDEGREE_TO_CELSIUS,
            InputKind::Freq => HZ_TO_MHZ,
            InputKind::Fan => RPM,
        }
    }
}

/// Dispositivo candidato antes da atribuição de índices.
struct Candidate {
    class: DeviceClass,
    name: String,
    dir: PathBuf,
    sort_key: String,
}

/// Varre `config.hwmon_root` e produz a tabela de métricas.
pub fn discover(config: &EngineConfig) -> Result<MetricTable, DiscoveryError> {
    let root = &config.hwmon_root;
    let entries = fs::read_dir(root).map_err(|source| DiscoveryError::RootUnavailable {
        path: root.clone(),
        source,
    })?;

    let patterns = config.patterns();
    let mut candidates: Vec<Candidate> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                debug!("Entrada ilegível em {}: {e}", root.display());
                None
            }
        })
        .filter_map(|dir| inspect_device(dir, &patterns, config.include_unknown))
        .collect();

    candidates.sort_by(|a, b| {
        (a.class, &a.name, &a.sort_key).cmp(&(b.class, &b.name, &b.sort_key))
    });

    let mut next_index: HashMap<DeviceClass, u32> = HashMap::new();
    let mut devices = Vec::with_capacity(candidates.len());
    let mut paths = Vec::new();

    for candidate in candidates {
        let counter = next_index.entry(candidate.class).or_insert(0);
        let index = *counter;
        *counter += 1;

        let device = DeviceInfo {
            class: candidate.class,
            index,
            name: candidate.name,
            dir: candidate.dir,
        };
        let found = enumerate_inputs(&device);
        info!(
            "✓ {} #{}: {} ({}) – {} sensores",
            device.class,
            device.index,
            device.name,
            device.dir.display(),
            found.len()
        );
        paths.extend(found);
        devices.push(device);
    }

    if let Some(cpu) = devices.iter().find(|d| d.class == DeviceClass::Cpu) {
        if let Some(clock) = cpu_clock_path(cpu, &config.cpufreq_root) {
            paths.push(clock);
        }
    }

    if devices.is_empty() {
        info!("Nenhum dispositivo reconhecido em {}", root.display());
    }

    Ok(MetricTable::new(devices, paths))
}

fn inspect_device(dir: PathBuf, patterns: &[DevicePattern], include_unknown: bool) -> Option<Candidate> {
    if !dir.is_dir() {
        return None;
    }
    let name = match reader::read_capped(&dir.join("name"), reader::TEXT_MAX_BYTES) {
        Ok(raw) => raw.trim().to_string(),
        Err(e) => {
            debug!("Ignorando {}: name ilegível ({e})", dir.display());
            return None;
        }
    };
    if name.is_empty() {
        debug!("Ignorando {}: name vazio", dir.display());
        return None;
    }

    let class = classify::classify_device(&name, patterns);
    if class == DeviceClass::Unknown && !include_unknown {
        debug!("Ignorando {} ({name}): driver não reconhecido", dir.display());
        return None;
    }

    let sort_key = fs::canonicalize(dir.join("device"))
        .or_else(|_| fs::canonicalize(&dir))
        .unwrap_or_else(|_| dir.clone())
        .to_string_lossy()
        .into_owned();

    Some(Candidate {
        class,
        name,
        dir,
        sort_key,
    })
}

/// Interpreta "temp3_input" como (Temp, 3).
fn parse_input_name(file_name: &str) -> Option<(InputKind, u32)> {
    let stem = file_name.strip_suffix("_input")?;
    [InputKind::Temp, InputKind::Freq, InputKind::Fan]
        .into_iter()
        .find_map(|kind| {
            let digits = stem.strip_prefix(kind.prefix())?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok().map(|n| (kind, n))
        })
}

fn enumerate_inputs(device: &DeviceInfo) -> Vec<SensorPath> {
    let entries = match fs::read_dir(&device.dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Não foi possível listar {}: {e}", device.dir.display());
            return Vec::new();
        }
    };

    let mut inputs: Vec<(InputKind, u32)> = entries
        .filter_map(Result::ok)
        .filter_map(|e| parse_input_name(&e.file_name().to_string_lossy()))
        .collect();
    inputs.sort();

    let mut channels: HashMap<MetricKind, u32> = HashMap::new();
    let mut paths = Vec::new();

    for (kind, n) in inputs {
        let prefix = kind.prefix();
        let label = read_trimmed(&device.dir.join(format!("{prefix}{n}_label")));
        let metric = match kind {
            InputKind::Temp => classify::temp_metric(device.class, label.as_deref()),
            InputKind::Freq => classify::freq_metric(n, label.as_deref()),
            InputKind::Fan => Some(MetricKind::FanSpeed),
        };
        let Some(metric) = metric else {
            debug!(
                "{}: {prefix}{n} ignorado (label {:?})",
                device.name,
                label.as_deref().unwrap_or("")
            );
            continue;
        };

        let critical = if kind == InputKind::Temp {
            reader::read_raw(&device.dir.join(format!("temp{n}_crit")))
                .ok()
                .map(|raw| raw as f64 * kind.scale())
        } else {
            None
        };

        let channel = channels.entry(metric).or_insert(0);
        let id = InstanceId::new(device.class, device.index, metric, *channel);
        *channel += 1;

        paths.push(SensorPath {
            id,
            device_name: device.name.clone(),
            label: label.unwrap_or_else(|| format!("{prefix}{n}")),
            source: SensorSource::File(device.dir.join(format!("{prefix}{n}_input"))),
            scale: kind.scale(),
            critical,
        });
    }

    paths
}

/// Clock médio da CPU via cpufreq, anexado ao primeiro dispositivo CPU.
fn cpu_clock_path(cpu: &DeviceInfo, cpufreq_root: &Path) -> Option<SensorPath> {
    let mut cores: Vec<(u32, PathBuf)> = fs::read_dir(cpufreq_root)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let n: u32 = name.strip_prefix("cpu")?.parse().ok()?;
            let path = e.path().join("cpufreq").join("scaling_cur_freq");
            path.is_file().then_some((n, path))
        })
        .collect();
    if cores.is_empty() {
        debug!("cpufreq indisponível em {}", cpufreq_root.display());
        return None;
    }
    cores.sort();
    debug!("cpufreq: {} cores", cores.len());

    Some(SensorPath {
        id: InstanceId::new(DeviceClass::Cpu, cpu.index, MetricKind::ClockCpu, 0),
        device_name: cpu.name.clone(),
        label: "scaling_cur_freq".into(),
        source: SensorSource::Mean(cores.into_iter().map(|(_, p)| p).collect()),
        scale: KHZ_TO_GHZ,
        critical: None,
    })
}
