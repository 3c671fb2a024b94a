//! Estado corrente/mínimo/máximo por instância de métrica.

/// Valores observados de uma instância. `None` até a primeira leitura válida,
/// para que ausência nunca seja confundida com zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MinMaxState {
    pub current: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl MinMaxState {
    /// Registra uma leitura bem-sucedida.
    pub fn record(&mut self, value: f64) {
        self.current = Some(value);
        if self.minimum.is_none_or(|min| value < min) {
            self.minimum = Some(value);
        }
        if self.maximum.is_none_or(|max| value > max) {
            self.maximum = Some(value);
        }
    }

    /// Limpa mínimo e máximo, preservando o valor corrente.
    pub fn reset_extremes(&mut self) {
        self.minimum = None;
        self.maximum = None;
    }

    pub fn has_reading(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_absent() {
        let state = MinMaxState::default();
        assert!(!state.has_reading());
        assert_eq!(state.minimum, None);
        assert_eq!(state.maximum, None);
    }

    #[test]
    fn tracks_extremes_over_sequence() {
        let readings = [52.0, 47.5, 61.25, 49.0, 58.0];
        let mut state = MinMaxState::default();
        for r in readings {
            state.record(r);
        }
        let (min, max) = (state.minimum.unwrap(), state.maximum.unwrap());
        for r in readings {
            assert!(min <= r && r <= max);
        }
        assert_eq!(min, 47.5);
        assert_eq!(max, 61.25);
        assert_eq!(state.current, Some(58.0));
    }

    #[test]
    fn zero_is_a_real_reading() {
        let mut state = MinMaxState::default();
        state.record(1200.0);
        state.record(0.0);
        assert_eq!(state.minimum, Some(0.0));
        assert_eq!(state.maximum, Some(1200.0));
    }

    #[test]
    fn reset_keeps_current() {
        let mut state = MinMaxState::default();
        state.record(40.0);
        state.record(70.0);
        state.reset_extremes();
        assert_eq!(state.current, Some(70.0));
        assert_eq!(state.minimum, None);
        assert_eq!(state.maximum, None);

        state.record(55.0);
        assert_eq!(state.minimum, Some(55.0));
        assert_eq!(state.maximum, Some(55.0));
        assert_eq!(state.current, Some(55.0));
    }
}
