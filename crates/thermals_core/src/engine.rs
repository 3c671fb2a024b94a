//! Motor de leitura: descoberta, ciclo de leitura e reset de min/max.
//!
//! Interface consumida pela camada de apresentação:
//! - [`ThermalEngine::discover`] – (re)varre o hwmon e retorna o nº de dispositivos
//! - [`ThermalEngine::tick`] – um ciclo de leitura, retorna um [`Snapshot`]
//! - [`ThermalEngine::reset`] – limpa mínimos e máximos

use crate::alerts::{AlertThresholds, Severity};
use crate::config::{AppConfig, EngineConfig};
use crate::discovery::{self, DiscoveryError};
use crate::minmax::MinMaxState;
use crate::reader::{self, ReadError};
use crate::snapshot::{InstanceReading, Snapshot};
use crate::table::MetricTable;
use crate::types::{InstanceId, SensorPath};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Dono exclusivo da tabela de métricas e do estado min/max.
pub struct ThermalEngine {
    config: EngineConfig,
    thresholds: AlertThresholds,
    table: Arc<MetricTable>,
    states: BTreeMap<InstanceId, MinMaxState>,
}

impl ThermalEngine {
    /// Cria um motor sem tabela; chame [`Self::discover`] ou
    /// [`Self::install_table`] antes do primeiro tick.
    pub fn new(config: EngineConfig, thresholds: AlertThresholds) -> Self {
        Self {
            config,
            thresholds,
            table: Arc::new(MetricTable::default()),
            states: BTreeMap::new(),
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.engine.clone(), config.alerts.clone())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &Arc<MetricTable> {
        &self.table
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: AlertThresholds) {
        self.thresholds = thresholds;
    }

    pub fn state(&self, id: &InstanceId) -> Option<&MinMaxState> {
        self.states.get(id)
    }

    /// Varre o hwmon de forma síncrona e instala a nova tabela.
    ///
    /// Com a raiz indisponível, instala uma tabela vazia e retorna o erro
    /// para a UI mostrar "nenhum sensor disponível".
    pub fn discover(&mut self) -> Result<usize, DiscoveryError> {
        match discovery::discover(&self.config) {
            Ok(table) => {
                let count = table.device_count();
                self.install_table(Arc::new(table));
                Ok(count)
            }
            Err(e) => {
                warn!("Descoberta falhou: {e}");
                self.install_table(Arc::new(MetricTable::default()));
                Err(e)
            }
        }
    }

    /// Publica uma tabela (ex: vinda de uma thread de descoberta).
    ///
    /// Instâncias que continuam existindo mantêm min/max; as demais são
    /// descartadas.
    pub fn install_table(&mut self, table: Arc<MetricTable>) {
        let ids = table.instance_ids();
        self.states.retain(|id, _| ids.binary_search(id).is_ok());
        for id in ids {
            self.states.entry(id).or_default();
        }
        info!(
            "Tabela instalada: {} dispositivos, {} métricas",
            table.device_count(),
            table.len()
        );
        self.table = table;
    }

    /// Executa um ciclo de leitura completo.
    ///
    /// Falhas individuais marcam a instância como stale e não alteram seu
    /// estado; o ciclo sempre termina com um snapshot.
    pub fn tick(&mut self) -> Snapshot {
        self.tick_with(reader::read_sensor)
    }

    /// Ciclo com uma função de leitura arbitrária; [`Self::tick`] usa o sysfs.
    fn tick_with<F>(&mut self, read: F) -> Snapshot
    where
        F: Fn(&SensorPath) -> Result<f64, ReadError>,
    {
        let table = Arc::clone(&self.table);
        let mut readings = BTreeMap::new();

        for sensor in table.paths() {
            let result = guarded_read(sensor.id, || read(sensor));
            let state = self.states.entry(sensor.id).or_default();
            let stale = match result {
                Ok(value) => {
                    state.record(value);
                    false
                }
                Err(e) => {
                    debug!("{}: {e}", sensor.id);
                    true
                }
            };
            let severity = state
                .current
                .map(|v| self.thresholds.level(sensor.metric(), v))
                .unwrap_or(Severity::Normal);

            readings.insert(
                sensor.id,
                InstanceReading {
                    id: sensor.id,
                    device_name: sensor.device_name.clone(),
                    label: sensor.label.clone(),
                    state: *state,
                    stale,
                    severity,
                    critical: sensor.critical,
                },
            );
        }

        Snapshot {
            timestamp: SystemTime::now(),
            readings,
        }
    }

    /// Limpa mínimos e máximos de todas as instâncias.
    pub fn reset(&mut self) {
        for state in self.states.values_mut() {
            state.reset_extremes();
        }
        info!("Min/max resetados");
    }
}

/// Converte um pânico dentro da leitura em falha da instância.
fn guarded_read<F>(id: InstanceId, read: F) -> Result<f64, ReadError>
where
    F: FnOnce() -> Result<f64, ReadError>,
{
    panic::catch_unwind(AssertUnwindSafe(read))
        .unwrap_or_else(|_| Err(ReadError::Panicked(id.to_string())))
}
