//! # Thermals Core
//!
//! Motor de sensores térmicos para Linux: descobre dispositivos no
//! `/sys/class/hwmon`, lê temperaturas, clocks e fans a cada ciclo e mantém
//! mínimo/máximo por instância. Sem dependência de toolkit de UI.
//!
//! ## Módulos
//! - [`types`] – Classes de dispositivo, métricas e caminhos de sensor
//! - [`classify`] – Driver → classe e label → métrica
//! - [`discovery`] – Varredura do hwmon e montagem da [`MetricTable`]
//! - [`reader`] – Leitura e conversão de arquivos do sysfs
//! - [`minmax`] – Estado atual/mínimo/máximo por instância
//! - [`engine`] – [`ThermalEngine`]: discover, tick, reset
//! - [`scheduler`] – [`Ticker`] que descarta ciclos sobrepostos
//! - [`snapshot`] – Saída imutável de cada ciclo
//! - [`alerts`] – Thresholds e severidade
//! - [`config`] – Configuração TOML
//! - [`hardware`] – Nomes de CPU e GPU para exibição
//! - [`theme`] – Temas de cores (Dark, Light, High Contrast)

pub mod types;
pub mod classify;
pub mod discovery;
pub mod reader;
pub mod minmax;
pub mod table;
pub mod engine;
pub mod scheduler;
pub mod snapshot;
pub mod alerts;
pub mod config;
pub mod hardware;
pub mod theme;

// Re-exports convenientes
pub use alerts::{AlertThresholds, Severity};
pub use config::{AppConfig, EngineConfig, TemperatureUnit};
pub use discovery::{discover, DiscoveryError};
pub use engine::ThermalEngine;
pub use minmax::MinMaxState;
pub use scheduler::Ticker;
pub use snapshot::{InstanceReading, Snapshot};
pub use table::MetricTable;
pub use types::{DeviceClass, InstanceId, MetricKind};
