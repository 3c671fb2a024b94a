//! Snapshot imutável emitido a cada ciclo de leitura.

use crate::alerts::Severity;
use crate::config::TemperatureUnit;
use crate::minmax::MinMaxState;
use crate::types::{DeviceClass, InstanceId, MetricKind};
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Leitura de uma instância em um ciclo.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceReading {
    pub id: InstanceId,
    pub device_name: String,
    pub label: String,
    /// Valores em unidade canônica (°C para temperaturas)
    pub state: MinMaxState,
    /// A última tentativa de leitura falhou
    pub stale: bool,
    pub severity: Severity,
    /// Limite crítico do kernel, se exposto
    pub critical: Option<f64>,
}

impl InstanceReading {
    pub fn metric(&self) -> MetricKind {
        self.id.metric
    }

    /// Nome para exibição, ex: "GPU Hotspot" ou "NVMe #1 Composite".
    ///
    /// O primeiro dispositivo de cada classe fica sem número; os demais
    /// levam o índice para não repetir nomes.
    pub fn display_name(&self) -> String {
        let class = self.id.device_class.title();
        match self.id.device_index {
            0 => format!("{class} {}", self.sensor_name()),
            index => format!("{class} #{index} {}", self.sensor_name()),
        }
    }

    /// Nome dentro do painel do dispositivo, ex: "Hotspot (junction)".
    pub fn sensor_name(&self) -> String {
        let title = self.id.metric.title();
        if self.label.is_empty() || self.label.eq_ignore_ascii_case(title) {
            title.to_string()
        } else {
            format!("{title} ({})", self.label)
        }
    }

    /// Valor formatado na unidade de exibição; `None` vira placeholder.
    pub fn format(&self, value: Option<f64>, unit: TemperatureUnit) -> String {
        format_value(self.metric(), value, unit)
    }
}

/// Formata um valor canônico; temperaturas são convertidas para `unit`.
pub fn format_value(metric: MetricKind, value: Option<f64>, unit: TemperatureUnit) -> String {
    let Some(value) = value else {
        return "—".to_string();
    };
    let decimals = metric.decimals();
    if metric.is_temperature() {
        format!("{:.*}{}", decimals, unit.convert(value), unit.symbol())
    } else {
        format!("{:.*}{}", decimals, value, metric.unit())
    }
}

/// Saída de um ciclo. O motor não guarda referência a snapshots passados.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub timestamp: SystemTime,
    pub readings: BTreeMap<InstanceId, InstanceReading>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            timestamp: SystemTime::now(),
            readings: BTreeMap::new(),
        }
    }

    pub fn get(&self, id: &InstanceId) -> Option<&InstanceReading> {
        self.readings.get(id)
    }

    /// Leituras ordenadas por classe, dispositivo, métrica e canal.
    pub fn iter(&self) -> impl Iterator<Item = &InstanceReading> {
        self.readings.values()
    }

    pub fn of_class(&self, class: DeviceClass) -> impl Iterator<Item = &InstanceReading> {
        self.iter().filter(move |r| r.id.device_class == class)
    }

    pub fn stale_count(&self) -> usize {
        self.iter().filter(|r| r.stale).count()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
