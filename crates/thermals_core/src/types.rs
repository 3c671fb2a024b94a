//! Tipos do motor de sensores.
//!
//! Classes de dispositivo, tipos de métrica e o registro imutável
//! [`SensorPath`] produzido pela descoberta.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ──────────────────────────────────────────────
// Escalas (valor bruto do kernel → unidade de exibição)
// ──────────────────────────────────────────────

/// `tempN_input` é reportado em milicelsius.
pub const MILLIDEGREE_TO_CELSIUS: f64 = 1.0 / 1_000.0;
/// `freqN_input` é reportado em Hz.
pub const HZ_TO_MHZ: f64 = 1.0 / 1_000_000.0;
/// `scaling_cur_freq` do cpufreq é reportado em kHz.
pub const KHZ_TO_GHZ: f64 = 1.0 / 1_000_000.0;
/// `fanN_input` já vem em RPM.
pub const RPM: f64 = 1.0;

// ──────────────────────────────────────────────
// Classe de dispositivo
// ──────────────────────────────────────────────

/// Categoria grossa de um dispositivo hwmon, inferida pelo nome do driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Cpu,
    Gpu,
    Nvme,
    Unknown,
}

impl DeviceClass {
    pub fn title(self) -> &'static str {
        match self {
            DeviceClass::Cpu => "CPU",
            DeviceClass::Gpu => "GPU",
            DeviceClass::Nvme => "NVMe",
            DeviceClass::Unknown => "Other",
        }
    }

    fn key(self) -> &'static str {
        match self {
            DeviceClass::Cpu => "cpu",
            DeviceClass::Gpu => "gpu",
            DeviceClass::Nvme => "nvme",
            DeviceClass::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ──────────────────────────────────────────────
// Métricas
// ──────────────────────────────────────────────

/// Grandeza física de uma métrica; define unidade e thresholds padrão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricCategory {
    Temperature,
    Clock,
    Fan,
}

/// Métrica lógica exibida pela UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    TempPackage,
    TempDie,
    TempEdge,
    TempHotspot,
    TempMemory,
    ClockCore,
    ClockMemory,
    ClockCpu,
    FanSpeed,
}

impl MetricKind {
    pub const ALL: [MetricKind; 9] = [
        MetricKind::TempPackage,
        MetricKind::TempDie,
        MetricKind::TempEdge,
        MetricKind::TempHotspot,
        MetricKind::TempMemory,
        MetricKind::ClockCore,
        MetricKind::ClockMemory,
        MetricKind::ClockCpu,
        MetricKind::FanSpeed,
    ];

    pub fn category(self) -> MetricCategory {
        match self {
            MetricKind::TempPackage
            | MetricKind::TempDie
            | MetricKind::TempEdge
            | MetricKind::TempHotspot
            | MetricKind::TempMemory => MetricCategory::Temperature,
            MetricKind::ClockCore | MetricKind::ClockMemory | MetricKind::ClockCpu => {
                MetricCategory::Clock
            }
            MetricKind::FanSpeed => MetricCategory::Fan,
        }
    }

    pub fn is_temperature(self) -> bool {
        self.category() == MetricCategory::Temperature
    }

    /// Chave estável usada no TOML (`[alerts.per_metric.temp_hotspot]`).
    pub fn key(self) -> &'static str {
        match self {
            MetricKind::TempPackage => "temp_package",
            MetricKind::TempDie => "temp_die",
            MetricKind::TempEdge => "temp_edge",
            MetricKind::TempHotspot => "temp_hotspot",
            MetricKind::TempMemory => "temp_memory",
            MetricKind::ClockCore => "clock_core",
            MetricKind::ClockMemory => "clock_memory",
            MetricKind::ClockCpu => "clock_cpu",
            MetricKind::FanSpeed => "fan_speed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Nome curto para a coluna "Sensor".
    pub fn title(self) -> &'static str {
        match self {
            MetricKind::TempPackage => "Package",
            MetricKind::TempDie => "Die",
            MetricKind::TempEdge => "Temp",
            MetricKind::TempHotspot => "Hotspot",
            MetricKind::TempMemory => "Memory",
            MetricKind::ClockCore => "Core Clock",
            MetricKind::ClockMemory => "Memory Clock",
            MetricKind::ClockCpu => "Clock",
            MetricKind::FanSpeed => "Fan Speed",
        }
    }

    /// Unidade de exibição para métricas que não são temperatura.
    /// Temperaturas dependem de [`crate::config::TemperatureUnit`].
    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::ClockCore | MetricKind::ClockMemory => " MHz",
            MetricKind::ClockCpu => " GHz",
            MetricKind::FanSpeed => " RPM",
            _ => "°C",
        }
    }

    pub fn decimals(self) -> usize {
        match self {
            MetricKind::ClockCpu => 2,
            MetricKind::ClockCore | MetricKind::ClockMemory | MetricKind::FanSpeed => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ──────────────────────────────────────────────
// Identidade de uma instância
// ──────────────────────────────────────────────

/// Identifica um fluxo de leitura sem depender da numeração `hwmonN`.
///
/// `device_index` é a posição do dispositivo entre os da mesma classe;
/// `channel` é a posição da entrada entre as da mesma métrica no dispositivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId {
    pub device_class: DeviceClass,
    pub device_index: u32,
    pub metric: MetricKind,
    pub channel: u32,
}

impl InstanceId {
    pub fn new(device_class: DeviceClass, device_index: u32, metric: MetricKind, channel: u32) -> Self {
        Self {
            device_class,
            device_index,
            metric,
            channel,
        }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}/{}.{}",
            self.device_class.key(),
            self.device_index,
            self.metric.key(),
            self.channel
        )
    }
}

// ──────────────────────────────────────────────
// Origem da leitura
// ──────────────────────────────────────────────

/// De onde vem o valor bruto de uma instância.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorSource {
    /// Um único arquivo numérico.
    File(PathBuf),
    /// Média dos arquivos legíveis (clock da CPU por core).
    Mean(Vec<PathBuf>),
}

impl SensorSource {
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            SensorSource::File(path) => std::slice::from_ref(path),
            SensorSource::Mean(paths) => paths,
        }
    }
}

// ──────────────────────────────────────────────
// SensorPath e dispositivos
// ──────────────────────────────────────────────

/// Registro imutável criado pela descoberta para cada instância de métrica.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorPath {
    pub id: InstanceId,
    /// Nome do driver (`name` do hwmon), ex: "k10temp"
    pub device_name: String,
    /// Label do kernel (`tempN_label`) ou nome derivado do arquivo
    pub label: String,
    pub source: SensorSource,
    /// Fator aplicado ao inteiro bruto
    pub scale: f64,
    /// Limite crítico reportado pelo kernel (`tempN_crit`), já escalado
    pub critical: Option<f64>,
}

impl SensorPath {
    pub fn device_class(&self) -> DeviceClass {
        self.id.device_class
    }

    pub fn metric(&self) -> MetricKind {
        self.id.metric
    }

    /// Arquivo principal lido por esta instância.
    pub fn file_path(&self) -> Option<&Path> {
        self.source.paths().first().map(PathBuf::as_path)
    }
}

/// Dispositivo hwmon classificado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub class: DeviceClass,
    pub index: u32,
    pub name: String,
    /// Diretório `hwmonN` no momento da descoberta
    pub dir: PathBuf,
}
