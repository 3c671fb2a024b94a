//! Tabela métrica → caminhos, produzida pela descoberta.

use crate::types::{DeviceClass, DeviceInfo, InstanceId, MetricKind, SensorPath};
use std::collections::BTreeMap;

/// Resultado tipado da descoberta. Construída de uma vez e consumida apenas
/// para leitura; uma nova varredura gera uma tabela nova.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    devices: Vec<DeviceInfo>,
    metrics: BTreeMap<MetricKind, Vec<SensorPath>>,
}

impl MetricTable {
    /// Agrupa os caminhos por métrica, ordenados por [`InstanceId`].
    pub fn new(devices: Vec<DeviceInfo>, paths: Vec<SensorPath>) -> Self {
        let mut metrics: BTreeMap<MetricKind, Vec<SensorPath>> = BTreeMap::new();
        for path in paths {
            metrics.entry(path.metric()).or_default().push(path);
        }
        for list in metrics.values_mut() {
            list.sort_by_key(|p| p.id);
        }
        Self { devices, metrics }
    }

    pub fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn devices_of(&self, class: DeviceClass) -> impl Iterator<Item = &DeviceInfo> {
        self.devices.iter().filter(move |d| d.class == class)
    }

    /// Todas as instâncias de uma métrica.
    pub fn get(&self, metric: MetricKind) -> &[SensorPath] {
        self.metrics.get(&metric).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn paths(&self) -> impl Iterator<Item = &SensorPath> {
        self.metrics.values().flatten()
    }

    pub fn instance_ids(&self) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = self.paths().map(|p| p.id).collect();
        ids.sort();
        ids
    }

    /// Número de instâncias de métrica.
    pub fn len(&self) -> usize {
        self.metrics.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Algum dispositivo foi classificado, mesmo que sem métricas legíveis.
    pub fn has_devices(&self) -> bool {
        !self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn path(class: DeviceClass, idx: u32, metric: MetricKind, channel: u32) -> SensorPath {
        SensorPath {
            id: InstanceId::new(class, idx, metric, channel),
            device_name: "dev".into(),
            label: String::new(),
            source: SensorSource::File(format!("/x/{idx}/{channel}").into()),
            scale: 1.0,
            critical: None,
        }
    }

    #[test]
    fn groups_instances_by_metric() {
        let table = MetricTable::new(
            vec![],
            vec![
                path(DeviceClass::Nvme, 1, MetricKind::TempPackage, 0),
                path(DeviceClass::Cpu, 0, MetricKind::TempPackage, 0),
                path(DeviceClass::Gpu, 0, MetricKind::FanSpeed, 0),
            ],
        );
        let packages = table.get(MetricKind::TempPackage);
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].device_class(), DeviceClass::Cpu);
        assert_eq!(table.len(), 3);
        assert!(table.get(MetricKind::ClockCpu).is_empty());
        assert!(!table.is_empty());
        assert!(!table.has_devices());
    }

    #[test]
    fn emptiness_counts_instances_not_devices() {
        let device = DeviceInfo {
            class: DeviceClass::Gpu,
            index: 0,
            name: "amdgpu".into(),
            dir: "/x/hwmon1".into(),
        };
        let table = MetricTable::new(vec![device], vec![]);
        assert!(table.has_devices());
        assert!(table.is_empty());
        assert!(MetricTable::default().is_empty());
    }
}
