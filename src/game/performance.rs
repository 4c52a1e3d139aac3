//! Rolling tick timer
//!
//! Measures how long each simulation tick takes against the frame budget
//! implied by the tick rate, so the runner can warn when a run with a
//! large horde stops keeping up.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Samples kept in the rolling window (~2 seconds at 60Hz)
const WINDOW: usize = 120;
/// Samples needed before the status is trusted
const MIN_SAMPLES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Under 70% of the frame budget
    Healthy,
    /// 70-100% of the frame budget
    Strained,
    /// Average tick exceeds the frame budget
    OverBudget,
}

#[derive(Debug, Clone)]
pub struct TickTimer {
    samples: VecDeque<Duration>,
    budget: Duration,
    strained_threshold: f32,
    status: BudgetStatus,
    started: Option<Instant>,
    last_entity_count: usize,
}

impl TickTimer {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            samples: VecDeque::with_capacity(WINDOW),
            budget: Duration::from_secs_f32(1.0 / tick_rate.max(1) as f32),
            strained_threshold: 0.7,
            status: BudgetStatus::Healthy,
            started: None,
            last_entity_count: 0,
        }
    }

    pub fn tick_start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the tick opened by [`tick_start`](Self::tick_start)
    pub fn tick_end(&mut self, entity_count: usize) {
        if let Some(start) = self.started.take() {
            self.record(start.elapsed());
            self.last_entity_count = entity_count;
        }
    }

    fn record(&mut self, duration: Duration) {
        self.samples.push_back(duration);
        while self.samples.len() > WINDOW {
            self.samples.pop_front();
        }
        if self.samples.len() < MIN_SAMPLES {
            return;
        }

        let usage = self.budget_usage();
        self.status = if usage >= 1.0 {
            BudgetStatus::OverBudget
        } else if usage >= self.strained_threshold {
            BudgetStatus::Strained
        } else {
            BudgetStatus::Healthy
        };
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let sum: Duration = self.samples.iter().sum();
        sum / self.samples.len() as u32
    }

    /// Slowest tick in the window
    pub fn worst(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Average tick time as a fraction of the frame budget
    pub fn budget_usage(&self) -> f32 {
        self.average().as_secs_f32() / self.budget.as_secs_f32()
    }

    pub fn status(&self) -> BudgetStatus {
        self.status
    }

    pub fn is_over_budget(&self) -> bool {
        self.status == BudgetStatus::OverBudget
    }

    pub fn last_entity_count(&self) -> usize {
        self.last_entity_count
    }

    pub fn status_message(&self) -> String {
        format!(
            "{:?} - {:.1}% budget (worst {:.2}ms), {} entities",
            self.status,
            self.budget_usage() * 100.0,
            self.worst().as_secs_f64() * 1000.0,
            self.last_entity_count
        )
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_needs_samples() {
        let mut timer = TickTimer::new(60);
        for _ in 0..MIN_SAMPLES - 1 {
            timer.record(Duration::from_millis(40));
        }
        assert_eq!(timer.status(), BudgetStatus::Healthy);
        timer.record(Duration::from_millis(40));
        assert!(timer.is_over_budget());
    }

    #[test]
    fn test_strained_band() {
        let mut timer = TickTimer::new(60);
        // ~16.67ms budget; 13ms is ~78%
        for _ in 0..20 {
            timer.record(Duration::from_millis(13));
        }
        assert_eq!(timer.status(), BudgetStatus::Strained);
    }

    #[test]
    fn test_window_recovers() {
        let mut timer = TickTimer::new(60);
        for _ in 0..20 {
            timer.record(Duration::from_millis(30));
        }
        assert!(timer.is_over_budget());
        for _ in 0..WINDOW {
            timer.record(Duration::from_millis(1));
        }
        assert_eq!(timer.status(), BudgetStatus::Healthy);
        assert_eq!(timer.worst(), Duration::from_millis(1));
    }

    #[test]
    fn test_tick_start_end() {
        let mut timer = TickTimer::new(60);
        timer.tick_end(3);
        assert_eq!(timer.last_entity_count(), 0);

        timer.tick_start();
        std::thread::sleep(Duration::from_millis(1));
        timer.tick_end(12);
        assert_eq!(timer.last_entity_count(), 12);
        assert!(timer.average() >= Duration::from_millis(1));
    }
}
