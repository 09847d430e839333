//! Scripted dialogue engine
//!
//! Owns the single system-wide typewriter, the displayed dialogue text, the
//! scripted queue cursor, and the hover/click/easter-egg interrupt contracts.
//! The queue cursor only ever moves forward; hover interrupts never advance
//! it. Reaching the end of the queue fires the welcome/CTA reveal exactly
//! once.

use crate::consts::*;
use crate::sim::typewriter::Typewriter;
use crate::tuning::Script;

/// Named queue states. Timer chains from the page script become explicit
/// transitions here so the ordering stays auditable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialoguePhase {
    /// Queue not yet started
    Idle,
    /// Typing indicator visible before the next queued line
    Indicator { until: f64 },
    /// Typewriter is revealing the line at the cursor
    Speaking,
    /// Pause between queued lines
    LinePause { until: f64 },
    /// Queue exhausted; settling before the terminal reveal
    FinaleSettle { until: f64 },
    /// Welcome text due next
    WelcomePending { until: f64 },
    /// CTA row due next
    CtaPending { until: f64 },
    /// Terminal; nothing further is scheduled
    Done,
}

/// Who the active reveal belongs to; routes its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Speaker {
    None,
    QueueLine,
    Hover,
    ClickIntro,
    ClickFollowup,
    EasterEgg,
}

/// A delayed follow-up armed by a completed reveal
#[derive(Debug, Clone, Copy, PartialEq)]
enum Interlude {
    None,
    /// Click intro finished: type the follow-up line after the delay
    ClickFollowup { at: f64 },
    /// Easter-egg response finished: restore the saved text after the delay
    EasterRestore { at: f64 },
}

/// Side effects for the presentation layer, drained per poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueCue {
    IndicatorShown,
    IndicatorHidden,
    /// Play the keystroke sound
    Keystroke,
    /// One-shot terminal transition: reveal the welcome text
    RevealWelcome,
    /// Follows the welcome after its own delay: reveal the CTA row
    RevealCtas,
}

pub struct Dialogue {
    script: Script,
    cursor: usize,
    phase: DialoguePhase,
    tw: Typewriter,
    speaker: Speaker,
    interlude: Interlude,
    display: String,
    saved: String,
    hovering: bool,
    cues: Vec<DialogueCue>,
}

impl Dialogue {
    pub fn new(script: Script, seed: u64) -> Self {
        Self {
            script,
            cursor: 0,
            phase: DialoguePhase::Idle,
            tw: Typewriter::new(seed),
            speaker: Speaker::None,
            interlude: Interlude::None,
            display: String::new(),
            saved: String::new(),
            hovering: false,
            cues: Vec::new(),
        }
    }

    /// The canonical dialogue text for the page to mirror
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn busy(&self) -> bool {
        self.tw.busy()
    }

    pub fn hovering(&self) -> bool {
        self.hovering
    }

    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Queue-start hand-off from the boot timeline
    pub fn begin(&mut self, now: f64) {
        if matches!(self.phase, DialoguePhase::Idle) {
            self.schedule_line(now);
        }
    }

    /// Pointer entered a CTA. Shows that protocol's hover line when the
    /// engine is otherwise idle; a reveal in progress drops the request.
    pub fn hover_enter(&mut self, protocol: &str, now: f64) {
        if self.tw.busy() || self.hovering {
            return;
        }
        let Some(line) = self.script.hover.get(protocol).cloned() else {
            return;
        };
        self.hovering = true;
        self.saved = std::mem::take(&mut self.display);
        if self.tw.start(&line, HOVER_TYPE_SPEED_MS, now) {
            self.speaker = Speaker::Hover;
        }
    }

    /// Pointer left a CTA. Restores the saved text only when no reveal is in
    /// progress; an active hover reveal keeps its text on screen.
    pub fn hover_leave(&mut self) {
        if !self.hovering {
            return;
        }
        self.hovering = false;
        if !self.tw.busy() {
            self.display = std::mem::take(&mut self.saved);
        }
    }

    /// CTA clicked. Click wins over an active hover: the hover flag is
    /// cleared and the saved text is abandoned rather than restored.
    pub fn click(&mut self, now: f64) {
        if self.tw.busy() {
            return;
        }
        self.hovering = false;
        self.saved.clear();
        let line = self.script.click_intro.clone();
        if self.tw.start(&line, CLICK_TYPE_SPEED_MS, now) {
            self.display.clear();
            self.speaker = Speaker::ClickIntro;
        }
    }

    /// Hidden-input trigger matched. Dropped while a reveal or a hover
    /// interrupt is active; otherwise types the response and restores the
    /// prior text after a fixed delay.
    pub fn easter_egg(&mut self, now: f64) {
        if self.tw.busy() || self.hovering {
            return;
        }
        self.saved = std::mem::take(&mut self.display);
        let line = self.script.easter_response.clone();
        if self.tw.start(&line, CLICK_TYPE_SPEED_MS, now) {
            self.speaker = Speaker::EasterEgg;
        }
    }

    /// Advance every timer that has come due and drain the resulting cues
    pub fn poll(&mut self, now: f64) -> Vec<DialogueCue> {
        let step = self.tw.poll(now);
        if !step.emitted.is_empty() {
            self.display.push_str(&step.emitted);
        }
        for _ in 0..step.cues {
            self.cues.push(DialogueCue::Keystroke);
        }
        if step.completed && self.speaker != Speaker::None {
            self.on_reveal_complete(now);
        }

        match self.interlude {
            Interlude::ClickFollowup { at } if now >= at => {
                self.interlude = Interlude::None;
                let line = self.script.click_followup.clone();
                if self.tw.start(&line, CLICK_TYPE_SPEED_MS, now) {
                    self.display.clear();
                    self.speaker = Speaker::ClickFollowup;
                }
            }
            Interlude::EasterRestore { at } if now >= at => {
                self.interlude = Interlude::None;
                self.display = std::mem::take(&mut self.saved);
            }
            _ => {}
        }

        match self.phase {
            DialoguePhase::Indicator { until } if now >= until => {
                self.cues.push(DialogueCue::IndicatorHidden);
                if let Some(line) = self.script.lines.get(self.cursor).cloned() {
                    // A busy typewriter (hover in flight) drops the start and
                    // the queue stalls on this line rather than re-queueing.
                    if self.tw.start(&line, TYPE_SPEED_MS, now) {
                        self.display.clear();
                        self.speaker = Speaker::QueueLine;
                    }
                    self.phase = DialoguePhase::Speaking;
                } else {
                    // An emptied-out script skips straight to the reveal
                    self.phase = DialoguePhase::FinaleSettle {
                        until: now + FINALE_SETTLE_MS,
                    };
                }
            }
            DialoguePhase::LinePause { until } if now >= until => {
                self.schedule_line(now);
            }
            DialoguePhase::FinaleSettle { until } if now >= until => {
                self.phase = DialoguePhase::WelcomePending {
                    until: now + WELCOME_REVEAL_MS,
                };
            }
            DialoguePhase::WelcomePending { until } if now >= until => {
                self.cues.push(DialogueCue::RevealWelcome);
                self.phase = DialoguePhase::CtaPending {
                    until: now + CTA_REVEAL_MS,
                };
            }
            DialoguePhase::CtaPending { until } if now >= until => {
                self.cues.push(DialogueCue::RevealCtas);
                self.phase = DialoguePhase::Done;
            }
            _ => {}
        }

        std::mem::take(&mut self.cues)
    }

    fn schedule_line(&mut self, now: f64) {
        self.phase = DialoguePhase::Indicator {
            until: now + INDICATOR_MS,
        };
        self.cues.push(DialogueCue::IndicatorShown);
    }

    fn on_reveal_complete(&mut self, now: f64) {
        match self.speaker {
            Speaker::QueueLine => {
                self.cursor += 1;
                if self.cursor < self.script.lines.len() {
                    self.phase = DialoguePhase::LinePause {
                        until: now + LINE_GAP_MS,
                    };
                } else {
                    self.phase = DialoguePhase::FinaleSettle {
                        until: now + FINALE_SETTLE_MS,
                    };
                }
            }
            Speaker::ClickIntro => {
                self.interlude = Interlude::ClickFollowup {
                    at: now + CLICK_FOLLOWUP_MS,
                };
            }
            Speaker::EasterEgg => {
                self.interlude = Interlude::EasterRestore {
                    at: now + EASTER_RESTORE_MS,
                };
            }
            Speaker::Hover | Speaker::ClickFollowup | Speaker::None => {}
        }
        self.speaker = Speaker::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn tiny_script() -> Script {
        Script {
            lines: vec!["Hi.".into(), "Bye.".into()],
            hover: BTreeMap::from([("standard".to_string(), "Safe choice.".to_string())]),
            click_intro: "Coming Soon".into(),
            click_followup: "Soon enough.".into(),
            easter_trigger: "root".into(),
            easter_response: "Denied.".into(),
        }
    }

    /// Poll in 10 ms steps until the predicate holds, collecting cues
    fn drive(
        d: &mut Dialogue,
        now: &mut f64,
        cues: &mut Vec<DialogueCue>,
        pred: impl Fn(&Dialogue) -> bool,
    ) {
        while !pred(d) {
            *now += 10.0;
            cues.extend(d.poll(*now));
            assert!(*now < 300_000.0, "dialogue stalled");
        }
    }

    fn finished_dialogue() -> (Dialogue, f64) {
        let mut d = Dialogue::new(tiny_script(), 5);
        let mut now = 0.0;
        let mut cues = Vec::new();
        d.begin(now);
        drive(&mut d, &mut now, &mut cues, |d| {
            matches!(d.phase(), DialoguePhase::Done)
        });
        (d, now)
    }

    #[test]
    fn test_queue_runs_to_terminal_exactly_once() {
        let script = tiny_script();
        let mut d = Dialogue::new(script.clone(), 42);
        let mut now = 0.0;
        let mut cues = Vec::new();
        d.begin(now);
        drive(&mut d, &mut now, &mut cues, |d| {
            matches!(d.phase(), DialoguePhase::Done)
        });

        assert_eq!(d.cursor(), script.lines.len());
        let welcomes = cues.iter().filter(|c| **c == DialogueCue::RevealWelcome);
        let ctas = cues.iter().filter(|c| **c == DialogueCue::RevealCtas);
        assert_eq!(welcomes.count(), 1);
        assert_eq!(ctas.count(), 1);
        // Last queued line stays on screen
        assert_eq!(d.display(), "Bye.");

        // Terminal state is quiescent
        for _ in 0..200 {
            now += 10.0;
            assert!(d.poll(now).is_empty());
        }
        assert_eq!(d.cursor(), script.lines.len());
    }

    #[test]
    fn test_empty_script_skips_to_reveal() {
        let mut d = Dialogue::new(
            Script {
                lines: vec![],
                ..tiny_script()
            },
            3,
        );
        let mut now = 0.0;
        let mut cues = Vec::new();
        d.begin(now);
        drive(&mut d, &mut now, &mut cues, |d| {
            matches!(d.phase(), DialoguePhase::Done)
        });
        assert_eq!(d.display(), "");
        assert_eq!(
            cues.iter()
                .filter(|c| **c == DialogueCue::RevealCtas)
                .count(),
            1
        );
    }

    #[test]
    fn test_indicator_brackets_each_line() {
        let mut d = Dialogue::new(tiny_script(), 1);
        let mut now = 0.0;
        let mut cues = Vec::new();
        d.begin(now);
        drive(&mut d, &mut now, &mut cues, |d| {
            matches!(d.phase(), DialoguePhase::Done)
        });
        let shown = cues
            .iter()
            .filter(|c| **c == DialogueCue::IndicatorShown)
            .count();
        let hidden = cues
            .iter()
            .filter(|c| **c == DialogueCue::IndicatorHidden)
            .count();
        assert_eq!(shown, 2);
        assert_eq!(hidden, 2);
    }

    #[test]
    fn test_begin_is_idempotent_after_start() {
        let (mut d, mut now) = finished_dialogue();
        d.begin(now);
        for _ in 0..200 {
            now += 10.0;
            assert!(d.poll(now).is_empty());
        }
        assert!(matches!(d.phase(), DialoguePhase::Done));
    }

    #[test]
    fn test_hover_shows_line_and_leave_restores() {
        let (mut d, mut now) = finished_dialogue();
        let mut cues = Vec::new();

        d.hover_enter("standard", now);
        assert!(d.hovering());
        drive(&mut d, &mut now, &mut cues, |d| !d.busy());
        assert_eq!(d.display(), "Safe choice.");

        d.hover_leave();
        assert!(!d.hovering());
        // Prior text restored verbatim
        assert_eq!(d.display(), "Bye.");
    }

    #[test]
    fn test_hover_unknown_protocol_is_noop() {
        let (mut d, now) = finished_dialogue();
        d.hover_enter("mystery", now);
        assert!(!d.hovering());
        assert_eq!(d.display(), "Bye.");
    }

    #[test]
    fn test_hover_while_busy_is_dropped() {
        let mut d = Dialogue::new(tiny_script(), 9);
        let mut now = 0.0;
        let mut cues = Vec::new();
        d.begin(now);
        // Reach mid-reveal of the first line
        drive(&mut d, &mut now, &mut cues, |d| d.busy());
        d.hover_enter("standard", now);
        assert!(!d.hovering());
        // Queue continues unharmed
        drive(&mut d, &mut now, &mut cues, |d| {
            matches!(d.phase(), DialoguePhase::Done)
        });
        assert_eq!(d.display(), "Bye.");
    }

    #[test]
    fn test_leave_during_hover_reveal_keeps_text() {
        let (mut d, mut now) = finished_dialogue();
        let mut cues = Vec::new();
        d.hover_enter("standard", now);
        // Leave before the hover line finishes typing
        now += 40.0;
        cues.extend(d.poll(now));
        assert!(d.busy());
        d.hover_leave();
        drive(&mut d, &mut now, &mut cues, |d| !d.busy());
        // No restore: the hover line remains displayed indefinitely
        assert_eq!(d.display(), "Safe choice.");
    }

    #[test]
    fn test_click_types_intro_then_followup_then_stops() {
        let (mut d, mut now) = finished_dialogue();
        let mut cues = Vec::new();

        d.click(now);
        drive(&mut d, &mut now, &mut cues, |d| !d.busy());
        assert_eq!(d.display(), "Coming Soon");
        let intro_done_at = now;

        // Follow-up arrives after the fixed delay, then nothing further
        drive(&mut d, &mut now, &mut cues, |d| d.busy());
        assert!(now - intro_done_at >= CLICK_FOLLOWUP_MS);
        drive(&mut d, &mut now, &mut cues, |d| !d.busy());
        assert_eq!(d.display(), "Soon enough.");
        for _ in 0..1000 {
            now += 10.0;
            d.poll(now);
        }
        assert_eq!(d.display(), "Soon enough.");
    }

    #[test]
    fn test_click_while_busy_is_dropped() {
        let mut d = Dialogue::new(tiny_script(), 2);
        let mut now = 0.0;
        let mut cues = Vec::new();
        d.begin(now);
        drive(&mut d, &mut now, &mut cues, |d| d.busy());
        let before = d.display().to_string();
        d.click(now);
        cues.extend(d.poll(now));
        // Display untouched beyond the in-flight queue line
        assert!(d.display().starts_with(&before));
        drive(&mut d, &mut now, &mut cues, |d| {
            matches!(d.phase(), DialoguePhase::Done)
        });
    }

    #[test]
    fn test_click_wins_over_hover() {
        let (mut d, mut now) = finished_dialogue();
        let mut cues = Vec::new();
        d.hover_enter("standard", now);
        drive(&mut d, &mut now, &mut cues, |d| !d.busy());
        assert!(d.hovering());

        d.click(now);
        assert!(!d.hovering());
        drive(&mut d, &mut now, &mut cues, |d| d.display() == "Soon enough.");
        // A late leave never restores the pre-hover text
        d.hover_leave();
        for _ in 0..500 {
            now += 10.0;
            d.poll(now);
        }
        assert_eq!(d.display(), "Soon enough.");
    }

    #[test]
    fn test_easter_egg_types_response_then_restores() {
        let (mut d, mut now) = finished_dialogue();
        let mut cues = Vec::new();

        d.easter_egg(now);
        drive(&mut d, &mut now, &mut cues, |d| d.display() == "Denied.");
        let done_at = now;
        drive(&mut d, &mut now, &mut cues, |d| d.display() == "Bye.");
        assert!(now - done_at >= EASTER_RESTORE_MS);
    }

    #[test]
    fn test_easter_egg_guarded_by_hover() {
        let (mut d, mut now) = finished_dialogue();
        let mut cues = Vec::new();
        d.hover_enter("standard", now);
        drive(&mut d, &mut now, &mut cues, |d| !d.busy());

        d.easter_egg(now);
        for _ in 0..1000 {
            now += 10.0;
            d.poll(now);
        }
        // Dropped: hover text stays, no restore timer armed
        assert_eq!(d.display(), "Safe choice.");
    }
}
