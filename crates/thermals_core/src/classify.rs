//! Classificação de dispositivos e entradas hwmon.
//!
//! O mapeamento nome-do-driver → [`DeviceClass`] é dado de configuração
//! (`[[engine.device_patterns]]`); os labels de sub-métrica são tabelas
//! estáticas seguindo a ABI do kernel.

use crate::types::{DeviceClass, MetricKind};
use serde::{Deserialize, Serialize};

/// Padrão de nome de driver. `*` final significa prefixo; a comparação
/// ignora maiúsculas/minúsculas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePattern {
    pub pattern: String,
    pub class: DeviceClass,
}

impl DevicePattern {
    pub fn new(pattern: impl Into<String>, class: DeviceClass) -> Self {
        Self {
            pattern: pattern.into(),
            class,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        glob_match(&self.pattern, name)
    }
}

/// Padrões conhecidos para CPUs e GPUs AMD/Intel e controladoras NVMe.
pub fn default_patterns() -> Vec<DevicePattern> {
    vec![
        DevicePattern::new("k10temp", DeviceClass::Cpu),
        DevicePattern::new("zenpower", DeviceClass::Cpu),
        DevicePattern::new("coretemp", DeviceClass::Cpu),
        DevicePattern::new("cpu_thermal", DeviceClass::Cpu),
        DevicePattern::new("amdgpu", DeviceClass::Gpu),
        DevicePattern::new("radeon", DeviceClass::Gpu),
        DevicePattern::new("nouveau", DeviceClass::Gpu),
        DevicePattern::new("i915", DeviceClass::Gpu),
        DevicePattern::new("xe", DeviceClass::Gpu),
        DevicePattern::new("nvme", DeviceClass::Nvme),
    ]
}

/// Primeiro padrão que casa define a classe; nenhum → `Unknown`.
pub fn classify_device(name: &str, patterns: &[DevicePattern]) -> DeviceClass {
    patterns
        .iter()
        .find(|p| p.matches(name))
        .map(|p| p.class)
        .unwrap_or(DeviceClass::Unknown)
}

// ──────────────────────────────────────────────
// Labels de sub-métricas
// ──────────────────────────────────────────────

const CPU_TEMP_LABELS: &[(&str, MetricKind)] = &[
    ("Tctl", MetricKind::TempPackage),
    ("Package id *", MetricKind::TempPackage),
    ("Tdie", MetricKind::TempDie),
    ("Tccd*", MetricKind::TempDie),
    ("Core *", MetricKind::TempDie),
];

const GPU_TEMP_LABELS: &[(&str, MetricKind)] = &[
    ("edge", MetricKind::TempEdge),
    ("junction", MetricKind::TempHotspot),
    ("mem", MetricKind::TempMemory),
];

const NVME_TEMP_LABELS: &[(&str, MetricKind)] = &[
    ("Composite", MetricKind::TempPackage),
    ("Sensor *", MetricKind::TempDie),
];

const FREQ_LABELS: &[(&str, MetricKind)] = &[
    ("sclk", MetricKind::ClockCore),
    ("mclk", MetricKind::ClockMemory),
];

/// Métrica de uma entrada `tempN_input`. `None` = label desconhecido.
pub fn temp_metric(class: DeviceClass, label: Option<&str>) -> Option<MetricKind> {
    let (table, unlabeled) = match class {
        DeviceClass::Cpu => (CPU_TEMP_LABELS, MetricKind::TempPackage),
        DeviceClass::Gpu => (GPU_TEMP_LABELS, MetricKind::TempEdge),
        DeviceClass::Nvme => (NVME_TEMP_LABELS, MetricKind::TempPackage),
        DeviceClass::Unknown => return Some(MetricKind::TempPackage),
    };
    match label {
        None => Some(unlabeled),
        Some(label) => lookup(table, label),
    }
}

/// Métrica de uma entrada `freqN_input`. Sem label, `freq1` é o clock do
/// core e `freq2` o da memória (convenção do amdgpu).
pub fn freq_metric(index: u32, label: Option<&str>) -> Option<MetricKind> {
    match label {
        Some(label) => lookup(FREQ_LABELS, label),
        None => match index {
            1 => Some(MetricKind::ClockCore),
            2 => Some(MetricKind::ClockMemory),
            _ => None,
        },
    }
}

fn lookup(table: &[(&str, MetricKind)], label: &str) -> Option<MetricKind> {
    table
        .iter()
        .find(|(pattern, _)| glob_match(pattern, label))
        .map(|(_, metric)| *metric)
}

fn glob_match(pattern: &str, text: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => text
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
        None => pattern.eq_ignore_ascii_case(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_classifies_known_drivers() {
        let patterns = default_patterns();
        assert_eq!(classify_device("k10temp", &patterns), DeviceClass::Cpu);
        assert_eq!(classify_device("amdgpu", &patterns), DeviceClass::Gpu);
        assert_eq!(classify_device("nvme", &patterns), DeviceClass::Nvme);
        assert_eq!(classify_device("acpitz", &patterns), DeviceClass::Unknown);
        // Exato, não substring
        assert_eq!(classify_device("nvme_extra", &patterns), DeviceClass::Unknown);
    }

    #[test]
    fn prefix_patterns_extend_the_table() {
        let mut patterns = default_patterns();
        patterns.push(DevicePattern::new("nct67*", DeviceClass::Cpu));
        assert_eq!(classify_device("nct6798", &patterns), DeviceClass::Cpu);
        assert_eq!(classify_device("NCT6775", &patterns), DeviceClass::Cpu);
    }

    #[test]
    fn prefix_match_does_not_split_multibyte_chars() {
        let pattern = DevicePattern::new("ab*", DeviceClass::Gpu);
        assert!(!pattern.matches("aé"));
        assert!(!pattern.matches("a"));
    }

    #[test]
    fn cpu_labels() {
        assert_eq!(temp_metric(DeviceClass::Cpu, Some("Tctl")), Some(MetricKind::TempPackage));
        assert_eq!(temp_metric(DeviceClass::Cpu, Some("Tdie")), Some(MetricKind::TempDie));
        assert_eq!(temp_metric(DeviceClass::Cpu, Some("Tccd2")), Some(MetricKind::TempDie));
        assert_eq!(temp_metric(DeviceClass::Cpu, Some("Package id 0")), Some(MetricKind::TempPackage));
        assert_eq!(temp_metric(DeviceClass::Cpu, None), Some(MetricKind::TempPackage));
        assert_eq!(temp_metric(DeviceClass::Cpu, Some("Vcore")), None);
    }

    #[test]
    fn gpu_and_nvme_labels() {
        assert_eq!(temp_metric(DeviceClass::Gpu, Some("junction")), Some(MetricKind::TempHotspot));
        assert_eq!(temp_metric(DeviceClass::Gpu, Some("mem")), Some(MetricKind::TempMemory));
        assert_eq!(temp_metric(DeviceClass::Gpu, None), Some(MetricKind::TempEdge));
        assert_eq!(temp_metric(DeviceClass::Nvme, Some("Composite")), Some(MetricKind::TempPackage));
        assert_eq!(temp_metric(DeviceClass::Nvme, Some("Sensor 2")), Some(MetricKind::TempDie));
    }

    #[test]
    fn freq_labels_and_fallback() {
        assert_eq!(freq_metric(1, Some("sclk")), Some(MetricKind::ClockCore));
        assert_eq!(freq_metric(7, Some("mclk")), Some(MetricKind::ClockMemory));
        assert_eq!(freq_metric(2, None), Some(MetricKind::ClockMemory));
        assert_eq!(freq_metric(3, None), None);
    }
}
