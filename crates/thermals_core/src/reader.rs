//! Leitura dos arquivos numéricos do sysfs.
//!
//! Cada leitura abre, lê (com limite de tamanho) e fecha o arquivo; nenhum
//! handle sobrevive entre ticks.

use crate::types::{MetricCategory, SensorPath, SensorSource};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Limite para arquivos de valor (`*_input`, `*_crit`).
pub const VALUE_MAX_BYTES: u64 = 64;
/// Limite para arquivos de texto (`name`, `*_label`).
pub const TEXT_MAX_BYTES: u64 = 256;

/// Falha ao ler uma instância. Nunca aborta o ciclo de leitura.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("falha ao ler {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("conteúdo não numérico em {path}: {content:?}")]
    Parse { path: PathBuf, content: String },

    #[error("valor implausível {value} em {path}")]
    Implausible { path: PathBuf, value: i64 },

    #[error("nenhum arquivo legível para {0}")]
    NoSource(String),

    #[error("pânico durante leitura de {0}")]
    Panicked(String),
}

/// Lê até `limit` bytes de um arquivo texto.
pub fn read_capped(path: &Path, limit: u64) -> io::Result<String> {
    let mut content = String::new();
    File::open(path)?.take(limit).read_to_string(&mut content)?;
    Ok(content)
}

/// Lê um arquivo texto curto e retorna o conteúdo aparado, se não vazio.
pub fn read_trimmed(path: &Path) -> Option<String> {
    read_capped(path, TEXT_MAX_BYTES)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Lê o inteiro bruto de um arquivo de valor.
pub fn read_raw(path: &Path) -> Result<i64, ReadError> {
    let content = read_capped(path, VALUE_MAX_BYTES).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trimmed = content.trim();
    trimmed.parse::<i64>().map_err(|_| ReadError::Parse {
        path: path.to_path_buf(),
        content: trimmed.to_string(),
    })
}

/// Lê e escala o valor de uma instância.
pub fn read_sensor(sensor: &SensorPath) -> Result<f64, ReadError> {
    let category = sensor.metric().category();
    let raw = match &sensor.source {
        SensorSource::File(path) => read_plausible(path, category)? as f64,
        SensorSource::Mean(paths) => mean_of(paths, category, &sensor.label)?,
    };
    Ok(raw * sensor.scale)
}

fn read_plausible(path: &Path, category: MetricCategory) -> Result<i64, ReadError> {
    let value = read_raw(path)?;
    // Clock zerado é glitch do driver, não uma medição
    if category == MetricCategory::Clock && value <= 0 {
        return Err(ReadError::Implausible {
            path: path.to_path_buf(),
            value,
        });
    }
    Ok(value)
}

fn mean_of(paths: &[PathBuf], category: MetricCategory, label: &str) -> Result<f64, ReadError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for path in paths {
        match read_plausible(path, category) {
            Ok(v) => {
                sum += v as f64;
                count += 1;
            }
            Err(e) => debug!("Ignorando core: {e}"),
        }
    }
    if count == 0 {
        return Err(ReadError::NoSource(label.to_string()));
    }
    Ok(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use std::fs;

    fn sensor(metric: MetricKind, source: SensorSource, scale: f64) -> SensorPath {
        SensorPath {
            id: InstanceId::new(DeviceClass::Cpu, 0, metric, 0),
            device_name: "k10temp".into(),
            label: "test".into(),
            source,
            scale,
            critical: None,
        }
    }

    #[test]
    fn reads_and_scales_millidegrees() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp1_input");
        fs::write(&path, "45000\n").unwrap();
        let s = sensor(MetricKind::TempPackage, SensorSource::File(path), MILLIDEGREE_TO_CELSIUS);
        assert_eq!(read_sensor(&s).unwrap(), 45.0);
    }

    #[test]
    fn non_numeric_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fan1_input");
        fs::write(&path, "N/A\n").unwrap();
        assert!(matches!(read_raw(&path), Err(ReadError::Parse { content, .. }) if content == "N/A"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_raw(&dir.path().join("gone")),
            Err(ReadError::Io { .. })
        ));
    }

    #[test]
    fn zero_clock_is_implausible_but_zero_fan_is_not() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value");
        fs::write(&path, "0").unwrap();

        let clock = sensor(MetricKind::ClockCore, SensorSource::File(path.clone()), HZ_TO_MHZ);
        assert!(matches!(read_sensor(&clock), Err(ReadError::Implausible { value: 0, .. })));

        let fan = sensor(MetricKind::FanSpeed, SensorSource::File(path), RPM);
        assert_eq!(read_sensor(&fan).unwrap(), 0.0);
    }

    #[test]
    fn mean_skips_unreadable_cores() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, "3000000").unwrap();
        fs::write(&b, "4000000").unwrap();
        let missing = dir.path().join("c");

        let s = sensor(MetricKind::ClockCpu, SensorSource::Mean(vec![a, b, missing.clone()]), KHZ_TO_GHZ);
        assert!((read_sensor(&s).unwrap() - 3.5).abs() < 1e-9);

        let none = sensor(MetricKind::ClockCpu, SensorSource::Mean(vec![missing]), KHZ_TO_GHZ);
        assert!(matches!(read_sensor(&none), Err(ReadError::NoSource(_))));
    }

    #[test]
    fn text_reads_are_capped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("name");
        fs::write(&path, "x".repeat(4096)).unwrap();
        assert_eq!(read_capped(&path, TEXT_MAX_BYTES).unwrap().len(), TEXT_MAX_BYTES as usize);
    }
}
