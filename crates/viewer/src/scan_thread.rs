//! Thread de descoberta: varre o hwmon fora da thread da UI e publica a
//! tabela pronta via channel.

use crossbeam_channel::{Receiver, bounded};
use std::sync::Arc;
use thermals_core::config::EngineConfig;
use thermals_core::discovery::{self, DiscoveryError};
use thermals_core::MetricTable;
use tracing::{debug, info};

/// Resultado de uma varredura, entregue uma única vez.
pub type ScanResult = Result<Arc<MetricTable>, DiscoveryError>;

/// Inicia uma varredura em background. Retorna o receiver do resultado.
pub fn spawn_scan(config: EngineConfig) -> Receiver<ScanResult> {
    let (tx, rx) = bounded::<ScanResult>(1);

    std::thread::Builder::new()
        .name("hwmon-scan".into())
        .spawn(move || {
            info!("Varrendo {}...", config.hwmon_root.display());
            let result = discovery::discover(&config).map(Arc::new);
            // A UI pode ter fechado antes do fim da varredura
            if tx.send(result).is_err() {
                debug!("UI encerrada, descartando resultado da varredura");
            }
        })
        .expect("Falha ao criar thread de descoberta");

    rx
}
