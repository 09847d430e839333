//! Boot timeline sequencer
//!
//! Fires a fixed sequence of one-time UI reveals at absolute offsets from
//! activation. Each phase fires at most once; there is no rollback and no
//! abort path.

/// One-time UI reveals, in firing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    /// Matrix-style falling code layer
    DataStream,
    /// Holographic ring layer
    HoloRings,
    /// Node network canvas starts animating
    NeuralCanvas,
    /// Background layers get their blur treatment
    BlurBackdrop,
    /// Main content container
    MainContent,
    /// Avatar + dialogue wrapper appears
    DialogueWrapper,
    /// Hand-off to the dialogue queue
    DialogueStart,
}

impl BootPhase {
    pub const ALL: [BootPhase; 7] = [
        BootPhase::DataStream,
        BootPhase::HoloRings,
        BootPhase::NeuralCanvas,
        BootPhase::BlurBackdrop,
        BootPhase::MainContent,
        BootPhase::DialogueWrapper,
        BootPhase::DialogueStart,
    ];

    /// Offset from timeline activation (ms)
    pub fn delay_ms(self) -> f64 {
        match self {
            BootPhase::DataStream => 0.0,
            BootPhase::HoloRings => 1500.0,
            BootPhase::NeuralCanvas => 3000.0,
            BootPhase::BlurBackdrop => 4500.0,
            BootPhase::MainContent => 5500.0,
            BootPhase::DialogueWrapper => 5800.0,
            BootPhase::DialogueStart => 6600.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Timeline {
    started_at: f64,
    fired: [bool; BootPhase::ALL.len()],
}

impl Timeline {
    /// Activate the sequence; offsets are measured from `now`
    pub fn start(now: f64) -> Self {
        Self {
            started_at: now,
            fired: [false; BootPhase::ALL.len()],
        }
    }

    /// Newly due phases in offset order, each returned at most once
    pub fn poll(&mut self, now: f64) -> Vec<BootPhase> {
        let mut due = Vec::new();
        for (i, phase) in BootPhase::ALL.into_iter().enumerate() {
            if !self.fired[i] && now - self.started_at >= phase.delay_ms() {
                self.fired[i] = true;
                due.push(phase);
            }
        }
        due
    }

    pub fn finished(&self) -> bool {
        self.fired.iter().all(|f| *f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_fire_in_order_once() {
        let mut tl = Timeline::start(100.0);
        assert_eq!(tl.poll(100.0), vec![BootPhase::DataStream]);
        assert_eq!(tl.poll(100.0), vec![]);
        assert_eq!(tl.poll(1599.9), vec![]);
        assert_eq!(tl.poll(1600.0), vec![BootPhase::HoloRings]);
        // A coarse poll delivers every overdue phase, still in offset order
        assert_eq!(
            tl.poll(100.0 + 6600.0),
            vec![
                BootPhase::NeuralCanvas,
                BootPhase::BlurBackdrop,
                BootPhase::MainContent,
                BootPhase::DialogueWrapper,
                BootPhase::DialogueStart,
            ]
        );
        assert!(tl.finished());
        assert_eq!(tl.poll(1e9), vec![]);
    }

    #[test]
    fn test_dialogue_start_is_last() {
        let last = *BootPhase::ALL.last().unwrap();
        assert_eq!(last, BootPhase::DialogueStart);
        for phase in BootPhase::ALL {
            assert!(phase.delay_ms() <= last.delay_ms());
        }
    }
}
