//! Temas de cores do visualizador.
//!
//! Cores ficam em hex para poderem ir ao TOML; a conversão para
//! `egui::Color32` acontece no viewer.

use serde::{Deserialize, Serialize};

/// Cor em formato hex string (ex: "#c0392b").
pub type ColorHex = String;

/// Definição completa de um tema de cores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Fundo
    pub bg: ColorHex,
    pub panel: ColorHex,
    pub border: ColorHex,
    // Texto
    pub text: ColorHex,
    pub dim: ColorHex,
    pub title: ColorHex,
    // Cabeçalho por classe de dispositivo
    pub cpu: ColorHex,
    pub gpu: ColorHex,
    pub nvme: ColorHex,
    pub other: ColorHex,
    // Severidade
    pub warning: ColorHex,
    pub critical: ColorHex,
    /// Leituras cuja última tentativa falhou
    pub stale: ColorHex,
}

/// Converte "#RRGGBB" em (r, g, b); entrada inválida vira branco.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return (255, 255, 255);
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
    (channel(0..2), channel(2..4), channel(4..6))
}

/// Tema escuro (padrão).
pub fn dark_theme() -> Theme {
    Theme {
        name: "dark".into(),
        bg: "#1a1a1a".into(),
        panel: "#252525".into(),
        border: "#333333".into(),
        text: "#e8e8e8".into(),
        dim: "#777777".into(),
        title: "#00d9ff".into(),
        cpu: "#00ff88".into(),
        gpu: "#ff6b6b".into(),
        nvme: "#ffa500".into(),
        other: "#bb86fc".into(),
        warning: "#f39c12".into(),
        critical: "#c0392b".into(),
        stale: "#555555".into(),
    }
}

pub fn light_theme() -> Theme {
    Theme {
        name: "light".into(),
        bg: "#f5f5f5".into(),
        panel: "#ffffff".into(),
        border: "#cccccc".into(),
        text: "#333333".into(),
        dim: "#888888".into(),
        title: "#0066cc".into(),
        cpu: "#00aa55".into(),
        gpu: "#cc4444".into(),
        nvme: "#cc7700".into(),
        other: "#7744aa".into(),
        warning: "#d68910".into(),
        critical: "#c0392b".into(),
        stale: "#aaaaaa".into(),
    }
}

/// Alto contraste (acessibilidade).
pub fn high_contrast_theme() -> Theme {
    Theme {
        name: "high_contrast".into(),
        bg: "#000000".into(),
        panel: "#1a1a1a".into(),
        border: "#ffffff".into(),
        text: "#ffffff".into(),
        dim: "#cccccc".into(),
        title: "#00ffff".into(),
        cpu: "#00ff00".into(),
        gpu: "#ff6600".into(),
        nvme: "#ffff00".into(),
        other: "#ff00ff".into(),
        warning: "#ffff00".into(),
        critical: "#ff0000".into(),
        stale: "#808080".into(),
    }
}

/// Retorna tema pelo nome; desconhecido vira "dark".
pub fn get_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "light" => light_theme(),
        "high_contrast" => high_contrast_theme(),
        _ => dark_theme(),
    }
}

pub fn theme_names() -> Vec<&'static str> {
    vec!["dark", "light", "high_contrast"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_rgb_valid_and_fallback() {
        assert_eq!(hex_to_rgb("#c0392b"), (192, 57, 43));
        assert_eq!(hex_to_rgb("f39c12"), (243, 156, 18));
        assert_eq!(hex_to_rgb("#fff"), (255, 255, 255));
        assert_eq!(hex_to_rgb("#éé0000"), (255, 255, 255));
    }

    #[test]
    fn all_themes_load() {
        for name in theme_names() {
            assert_eq!(get_theme(name).name, name);
        }
        assert_eq!(get_theme("nonexistent").name, "dark");
    }

    #[test]
    fn dark_alert_colors() {
        let t = dark_theme();
        assert_eq!(hex_to_rgb(&t.warning), (0xf3, 0x9c, 0x12));
        assert_eq!(hex_to_rgb(&t.critical), (0xc0, 0x39, 0x2b));
    }
}
