//! Agendador de ciclos independente de toolkit de UI.
//!
//! "A cada intervalo, execute `tick()` se nenhum ciclo anterior estiver em
//! andamento." Ciclos que chegam com outro em andamento são descartados,
//! nunca enfileirados.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Controla cadência e exclusão mútua dos ciclos de leitura.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    last_start: Option<Instant>,
    in_flight: Arc<AtomicBool>,
    skipped: u64,
}

/// Marca um ciclo em andamento; liberado no drop.
#[derive(Debug)]
pub struct TickGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: None,
            in_flight: Arc::new(AtomicBool::new(false)),
            skipped: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// O intervalo já passou desde o último ciclo (ou nunca houve ciclo).
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_start
            .is_none_or(|t| now.saturating_duration_since(t) >= self.interval)
    }

    /// Quanto falta para o próximo ciclo.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        match self.last_start {
            Some(t) => self.interval.saturating_sub(now.saturating_duration_since(t)),
            None => Duration::ZERO,
        }
    }

    /// Tenta iniciar um ciclo. `None` se ainda não é hora ou se outro ciclo
    /// está em andamento (neste caso o tick é contado como descartado).
    pub fn try_begin(&mut self, now: Instant) -> Option<TickGuard> {
        if !self.is_due(now) {
            return None;
        }
        self.last_start = Some(now);
        if self.in_flight.swap(true, Ordering::AcqRel) {
            self.skipped += 1;
            return None;
        }
        Some(TickGuard {
            flag: Arc::clone(&self.in_flight),
        })
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Ticks descartados por sobreposição.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
