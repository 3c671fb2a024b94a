//! Sistema de alertas – níveis e avaliação de thresholds.
//!
//! Thresholds ficam em unidades canônicas (°C, MHz, GHz, RPM) e valem por
//! categoria de métrica, com override opcional por tipo de métrica.

use crate::snapshot::Snapshot;
use crate::types::{InstanceId, MetricCategory, MetricKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nível de alerta de uma leitura, usado para colorir a UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

/// Par (warning, critical). `None` desativa o nível.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdPair {
    pub warning: Option<f64>,
    pub critical: Option<f64>,
}

impl ThresholdPair {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self {
            warning: Some(warning),
            critical: Some(critical),
        }
    }

    pub const fn disabled() -> Self {
        Self {
            warning: None,
            critical: None,
        }
    }

    /// Retorna o [`Severity`] para um valor.
    pub fn level(&self, value: f64) -> Severity {
        if self.critical.is_some_and(|c| value >= c) {
            Severity::Critical
        } else if self.warning.is_some_and(|w| value >= w) {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    pub(crate) fn is_ordered(&self) -> bool {
        match (self.warning, self.critical) {
            (Some(w), Some(c)) => w <= c,
            _ => true,
        }
    }
}

/// Thresholds por categoria com overrides por métrica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub temperature: ThresholdPair,
    pub clock: ThresholdPair,
    pub fan: ThresholdPair,
    /// Chave = [`MetricKind::key`], ex: "temp_hotspot"
    pub per_metric: BTreeMap<String, ThresholdPair>,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        let per_metric = [
            (MetricKind::TempHotspot, ThresholdPair::new(95.0, 105.0)),
            (MetricKind::TempMemory, ThresholdPair::new(90.0, 100.0)),
        ]
        .into_iter()
        .map(|(m, p)| (m.key().to_string(), p))
        .collect();

        Self {
            temperature: ThresholdPair::new(80.0, 85.0),
            clock: ThresholdPair::disabled(),
            fan: ThresholdPair::disabled(),
            per_metric,
        }
    }
}

impl AlertThresholds {
    /// Thresholds efetivos de uma métrica.
    pub fn for_metric(&self, metric: MetricKind) -> ThresholdPair {
        if let Some(pair) = self.per_metric.get(metric.key()) {
            return *pair;
        }
        match metric.category() {
            MetricCategory::Temperature => self.temperature,
            MetricCategory::Clock => self.clock,
            MetricCategory::Fan => self.fan,
        }
    }

    pub fn level(&self, metric: MetricKind, value: f64) -> Severity {
        self.for_metric(metric).level(value)
    }
}

/// Um alerta disparado.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: InstanceId,
    pub label: String,
    pub value: f64,
    pub level: Severity,
}

/// Coleta as leituras frescas acima de Normal de um snapshot.
pub fn evaluate_alerts(snapshot: &Snapshot) -> Vec<Alert> {
    snapshot
        .iter()
        .filter(|r| !r.stale && r.severity > Severity::Normal)
        .filter_map(|r| {
            r.state.current.map(|value| Alert {
                id: r.id,
                label: r.display_name(),
                value,
                level: r.severity,
            })
        })
        .collect()
}

/// Retorna o [`Severity`] para um valor dado thresholds.
pub fn level_for_value(value: f64, warn: f64, crit: f64) -> Severity {
    ThresholdPair::new(warn, crit).level(value)
}
