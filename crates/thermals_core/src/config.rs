//! Configuração unificada via TOML.
//!
//! Um único `config.toml` em `$XDG_CONFIG_HOME/lx-thermals/` com as seções
//! `[engine]`, `[display]` e `[alerts]`.

use crate::alerts::AlertThresholds;
use crate::classify::{self, DevicePattern};
use crate::discovery::{DEFAULT_CPUFREQ_ROOT, DEFAULT_HWMON_ROOT};
use crate::hardware::{DEFAULT_DRM_ROOT, DEFAULT_PCI_IDS};
use crate::theme;
use crate::types::MetricKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Erros de leitura/gravação da configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("erro ao ler {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("erro ao parsear configuração: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("erro ao serializar configuração: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("erro ao gravar {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuração inválida: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Unidade de exibição das temperaturas. Os valores internos (min/max e
/// thresholds) ficam sempre em °C.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// Configuração do motor de descoberta/leitura.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Raiz do hwmon (trocável para testes)
    pub hwmon_root: PathBuf,
    /// Raiz do cpufreq para o clock da CPU
    pub cpufreq_root: PathBuf,
    /// Raiz do DRM para identificar a GPU
    pub drm_root: PathBuf,
    /// Banco de IDs PCI
    pub pci_ids: PathBuf,
    /// Inclui dispositivos não classificados na tabela
    pub include_unknown: bool,
    /// Padrões nome-do-driver → classe
    pub device_patterns: Vec<DevicePattern>,
    /// Padrões adicionais, consultados antes de `device_patterns`
    pub extra_patterns: Vec<DevicePattern>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hwmon_root: PathBuf::from(DEFAULT_HWMON_ROOT),
            cpufreq_root: PathBuf::from(DEFAULT_CPUFREQ_ROOT),
            drm_root: PathBuf::from(DEFAULT_DRM_ROOT),
            pci_ids: PathBuf::from(DEFAULT_PCI_IDS),
            include_unknown: false,
            device_patterns: classify::default_patterns(),
            extra_patterns: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Configuração apontando para uma árvore hwmon sintética.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            hwmon_root: root.into(),
            ..Self::default()
        }
    }

    /// Tabela efetiva de padrões, na ordem de consulta.
    pub fn patterns(&self) -> Vec<DevicePattern> {
        self.extra_patterns
            .iter()
            .chain(&self.device_patterns)
            .cloned()
            .collect()
    }
}

/// Preferências de exibição.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub temperature_unit: TemperatureUnit,
    /// Intervalo entre ciclos de leitura (ms)
    pub poll_interval_ms: u64,
    /// Tema: "dark", "light", "high_contrast"
    pub theme: String,
    /// Gráficos de histórico visíveis ao abrir
    pub show_graphs: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Celsius,
            poll_interval_ms: 1000,
            theme: "dark".into(),
            show_graphs: false,
        }
    }
}

/// Configuração raiz do aplicativo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub display: DisplayConfig,
    pub alerts: AlertThresholds,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML; em caso de erro usa o padrão.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match Self::load_file(path) {
                Ok(config) => {
                    info!("Configuração carregada de {}", path.display());
                    return config;
                }
                Err(e) => warn!("{e}"),
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Carrega e valida um arquivo, propagando erros.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&content)
    }

    /// Parseia e valida uma string TOML.
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }
        Ok(config)
    }

    /// Salva configuração em arquivo TOML, criando o diretório se preciso.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("lx-thermals"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.display.poll_interval_ms)
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(100..=60_000).contains(&self.display.poll_interval_ms) {
            errors.push(format!(
                "display.poll_interval_ms inválido: {} (100–60000)",
                self.display.poll_interval_ms
            ));
        }
        if !theme::theme_names().contains(&self.display.theme.as_str()) {
            errors.push(format!("display.theme desconhecido: {}", self.display.theme));
        }
        if self.engine.hwmon_root.as_os_str().is_empty() {
            errors.push("engine.hwmon_root não pode ser vazio".into());
        }
        for (i, p) in self.engine.patterns().iter().enumerate() {
            if p.pattern.trim().is_empty() || p.pattern == "*" {
                errors.push(format!("engine: padrão de dispositivo #{i} vazio"));
            }
        }

        let named = [
            ("temperature", &self.alerts.temperature),
            ("clock", &self.alerts.clock),
            ("fan", &self.alerts.fan),
        ];
        for (name, pair) in named {
            if !pair.is_ordered() {
                errors.push(format!("alerts.{name}: warning maior que critical"));
            }
        }
        for (key, pair) in &self.alerts.per_metric {
            if MetricKind::from_key(key).is_none() {
                errors.push(format!("alerts.per_metric: métrica desconhecida '{key}'"));
            } else if !pair.is_ordered() {
                errors.push(format!("alerts.per_metric.{key}: warning maior que critical"));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::ThresholdPair;
    use crate::types::DeviceClass;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "Erros: {:?}", errors);
    }

    #[test]
    fn roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::load_from_str(&toml_str).unwrap();
        assert_eq!(config.display.poll_interval_ms, parsed.display.poll_interval_ms);
        assert_eq!(config.engine.device_patterns, parsed.engine.device_patterns);
        assert_eq!(config.alerts, parsed.alerts);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let partial = r#"
[display]
temperature_unit = "fahrenheit"
poll_interval_ms = 2000
"#;
        let config = AppConfig::load_from_str(partial).unwrap();
        assert_eq!(config.display.temperature_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        // Outros campos devem ter valor padrão
        assert_eq!(config.engine.hwmon_root, PathBuf::from("/sys/class/hwmon"));
        assert_eq!(config.display.theme, "dark");
    }

    #[test]
    fn extra_device_patterns_from_toml() {
        let text = r#"
[[engine.extra_patterns]]
pattern = "nct67*"
class = "cpu"

[alerts.per_metric.temp_hotspot]
warning = 90.0
critical = 100.0
"#;
        let config = AppConfig::load_from_str(text).unwrap();
        let patterns = config.engine.patterns();
        assert_eq!(patterns.len(), classify::default_patterns().len() + 1);
        assert_eq!(classify::classify_device("nct6798", &patterns), DeviceClass::Cpu);
        assert_eq!(classify::classify_device("amdgpu", &patterns), DeviceClass::Gpu);
        assert_eq!(
            config.alerts.per_metric.get("temp_hotspot"),
            Some(&ThresholdPair::new(90.0, 100.0))
        );
    }

    #[test]
    fn rejects_out_of_range_interval() {
        let err = AppConfig::load_from_str("[display]\npoll_interval_ms = 5\n").unwrap_err();
        assert!(err.to_string().contains("poll_interval_ms"));
    }

    #[test]
    fn rejects_unknown_metric_override() {
        let err = AppConfig::load_from_str("[alerts.per_metric.voltage]\nwarning = 1.0\n").unwrap_err();
        assert!(err.to_string().contains("voltage"));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut config = AppConfig::default();
        config.alerts.temperature = ThresholdPair::new(90.0, 80.0);
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn fahrenheit_conversion() {
        assert_eq!(TemperatureUnit::Fahrenheit.convert(100.0), 212.0);
        assert_eq!(TemperatureUnit::Celsius.convert(45.0), 45.0);
    }

    #[test]
    fn save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.display.theme = "light".into();
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path);
        assert_eq!(loaded.display.theme, "light");
    }

    #[test]
    fn load_falls_back_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "display = [").unwrap();
        let config = AppConfig::load(&path);
        assert_eq!(config.display.poll_interval_ms, 1000);
    }
}
