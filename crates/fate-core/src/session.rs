//! The interactive session controller.
//!
//! `Session` wraps a [`RollEngine`] and adds the fortune side of the
//! widget: whether fortunes are enabled, the fortune currently shown, and
//! which roll a pending fortune request belongs to. Fortune fetching itself
//! happens elsewhere; the session hands out a [`FortuneRequest`] when a roll
//! resolves and accepts the answer through [`Session::apply_fortune`], which
//! discards answers for rolls that are no longer current.

use std::time::Instant;

use serde::Serialize;

use crate::die::DieKind;
use crate::engine::{Resolution, RollEngine};
use crate::fortune::Fortune;
use crate::outcome::RollOutcome;

/// A fortune to be fetched for a resolved roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FortuneRequest {
    /// Sequence number of the roll being interpreted.
    pub sequence: u64,
    /// The face that came up.
    pub value: u32,
    /// The die that was rolled.
    pub die: DieKind,
}

/// What [`Session::poll`] reports when a roll resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The engine's resolution.
    pub resolution: Resolution,
    /// Present when fortunes are enabled; the caller should fetch it.
    pub fortune_request: Option<FortuneRequest>,
}

/// Read-only snapshot of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Die kind in use.
    pub die: DieKind,
    /// Face currently showing.
    pub current_value: u32,
    /// Whether a roll is in flight.
    pub is_rolling: bool,
    /// Whether fortunes are requested after each roll.
    pub ai_enabled: bool,
    /// Fortune for the latest roll, if one arrived.
    pub fortune: Option<Fortune>,
    /// Whether a fortune for the latest roll is on its way.
    pub is_fortune_loading: bool,
    /// The latest completed roll.
    pub last_outcome: Option<RollOutcome>,
}

/// Session state owned by a single controller.
#[derive(Debug)]
pub struct Session {
    engine: RollEngine,
    ai_enabled: bool,
    fortune: Option<Fortune>,
    awaiting: Option<u64>,
}

impl Session {
    /// Create a session around an engine.
    pub fn new(engine: RollEngine, ai_enabled: bool) -> Self {
        Self {
            engine,
            ai_enabled,
            fortune: None,
            awaiting: None,
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &RollEngine {
        &self.engine
    }

    /// Die kind in use.
    pub fn die(&self) -> DieKind {
        self.engine.die()
    }

    /// Face currently showing.
    pub fn current_value(&self) -> u32 {
        self.engine.current_value()
    }

    /// Whether a roll is in flight.
    pub fn is_rolling(&self) -> bool {
        self.engine.is_rolling()
    }

    /// Whether fortunes are enabled.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// The fortune currently shown.
    pub fn fortune(&self) -> Option<&Fortune> {
        self.fortune.as_ref()
    }

    /// Whether a fortune request is outstanding for the current roll.
    pub fn is_fortune_loading(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Take a snapshot for rendering or serialization.
    pub fn state(&self) -> SessionState {
        SessionState {
            die: self.engine.die(),
            current_value: self.engine.current_value(),
            is_rolling: self.engine.is_rolling(),
            ai_enabled: self.ai_enabled,
            fortune: self.fortune.clone(),
            is_fortune_loading: self.is_fortune_loading(),
            last_outcome: self.engine.last_outcome().cloned(),
        }
    }

    /// Start a roll. No-op (returns `false`) while one is in flight.
    ///
    /// Clears the shown fortune and orphans any outstanding fortune request.
    pub fn roll_trigger(&mut self, now: Instant) -> bool {
        if !self.engine.trigger(now) {
            return false;
        }
        self.fortune = None;
        self.awaiting = None;
        true
    }

    /// Switch die kind: shows face 1 and clears the fortune.
    pub fn set_die_kind(&mut self, die: DieKind) {
        self.engine.set_die(die);
        self.fortune = None;
        self.awaiting = None;
    }

    /// Enable or disable fortunes. Disabling drops the shown fortune and
    /// any outstanding request.
    pub fn set_ai_enabled(&mut self, enabled: bool) {
        self.ai_enabled = enabled;
        if !enabled {
            self.fortune = None;
            self.awaiting = None;
        }
    }

    /// Flip the fortune toggle and return the new setting.
    pub fn toggle_ai(&mut self) -> bool {
        self.set_ai_enabled(!self.ai_enabled);
        self.ai_enabled
    }

    /// Resolve the in-flight roll if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Resolved> {
        let resolution = self.engine.poll(now)?;
        let fortune_request = self.ai_enabled.then(|| {
            let outcome = &resolution.outcome;
            self.awaiting = Some(outcome.sequence);
            FortuneRequest {
                sequence: outcome.sequence,
                value: outcome.value,
                die: outcome.die,
            }
        });
        Some(Resolved {
            resolution,
            fortune_request,
        })
    }

    /// Deliver a fetched fortune for roll `sequence`.
    ///
    /// Returns `false` and discards the fortune if it no longer belongs to
    /// the current roll.
    pub fn apply_fortune(&mut self, sequence: u64, fortune: Fortune) -> bool {
        if self.awaiting != Some(sequence) {
            tracing::debug!(sequence, current = ?self.awaiting, "discarding stale fortune");
            return false;
        }
        self.awaiting = None;
        self.fortune = Some(fortune);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ROLL_DURATION;
    use crate::fortune::Tone;
    use crate::random::ScriptedRandom;
    use proptest::prelude::*;
    use std::time::Duration;

    fn session(values: &[u32], ai: bool) -> Session {
        let engine = RollEngine::with_source(DieKind::Six, ScriptedRandom::new(values.to_vec()));
        Session::new(engine, ai)
    }

    fn roll(s: &mut Session, at: Instant) -> Resolved {
        assert!(s.roll_trigger(at));
        s.poll(at + ROLL_DURATION).expect("resolves")
    }

    #[test]
    fn roll_without_ai_requests_nothing() {
        let mut s = session(&[4], false);
        let resolved = roll(&mut s, Instant::now());
        assert_eq!(resolved.resolution.outcome.value, 4);
        assert!(resolved.fortune_request.is_none());
        assert!(!s.is_fortune_loading());
    }

    #[test]
    fn roll_with_ai_requests_fortune_after_resolution() {
        let mut s = session(&[6], true);
        let t0 = Instant::now();
        assert!(s.roll_trigger(t0));
        assert!(!s.is_fortune_loading());
        assert!(s.poll(t0 + Duration::from_millis(100)).is_none());

        let resolved = s.poll(t0 + ROLL_DURATION).unwrap();
        let req = resolved.fortune_request.unwrap();
        assert_eq!(req.value, 6);
        assert_eq!(req.die, DieKind::Six);
        assert!(!s.is_rolling());
        assert!(s.is_fortune_loading());

        assert!(s.apply_fortune(req.sequence, Fortune::new("Victory!", Tone::Lucky)));
        assert!(!s.is_fortune_loading());
        assert_eq!(s.fortune().unwrap().text, "Victory!");
    }

    #[test]
    fn new_roll_clears_fortune() {
        let mut s = session(&[2, 3], true);
        let t0 = Instant::now();
        let req = roll(&mut s, t0).fortune_request.unwrap();
        s.apply_fortune(req.sequence, Fortune::neutral("meh"));

        assert!(s.roll_trigger(t0 + Duration::from_secs(2)));
        assert!(s.fortune().is_none());
    }

    #[test]
    fn trigger_while_rolling_keeps_state() {
        let mut s = session(&[5], false);
        let t0 = Instant::now();
        assert!(s.roll_trigger(t0));
        let before = s.state();
        assert!(!s.roll_trigger(t0 + Duration::from_millis(10)));
        assert_eq!(s.state(), before);
    }

    #[test]
    fn set_die_kind_resets_face_and_fortune() {
        let mut s = session(&[5], true);
        let req = roll(&mut s, Instant::now()).fortune_request.unwrap();
        s.apply_fortune(req.sequence, Fortune::neutral("hmm"));
        assert_eq!(s.current_value(), 5);

        s.set_die_kind(DieKind::TwentyOne);
        let state = s.state();
        assert_eq!(state.die, DieKind::TwentyOne);
        assert_eq!(state.current_value, 1);
        assert!(state.fortune.is_none());
        assert!(!state.is_fortune_loading);
    }

    #[test]
    fn stale_fortune_is_discarded_after_new_roll() {
        let mut s = session(&[2, 3], true);
        let t0 = Instant::now();
        let first = roll(&mut s, t0).fortune_request.unwrap();
        let second = roll(&mut s, t0 + Duration::from_secs(2))
            .fortune_request
            .unwrap();

        assert!(!s.apply_fortune(first.sequence, Fortune::neutral("old")));
        assert!(s.fortune().is_none());
        assert!(s.is_fortune_loading());

        assert!(s.apply_fortune(second.sequence, Fortune::neutral("new")));
        assert_eq!(s.fortune().unwrap().text, "new");
    }

    #[test]
    fn fortune_arriving_after_die_switch_is_discarded() {
        let mut s = session(&[4], true);
        let req = roll(&mut s, Instant::now()).fortune_request.unwrap();
        s.set_die_kind(DieKind::TwentyOne);
        assert!(!s.apply_fortune(req.sequence, Fortune::neutral("late")));
        assert!(s.fortune().is_none());
    }

    #[test]
    fn disabling_ai_drops_pending_request() {
        let mut s = session(&[4], true);
        let req = roll(&mut s, Instant::now()).fortune_request.unwrap();
        assert!(!s.toggle_ai());
        assert!(!s.is_fortune_loading());
        assert!(!s.apply_fortune(req.sequence, Fortune::neutral("late")));
    }

    #[test]
    fn duplicate_delivery_is_ignored() {
        let mut s = session(&[4], true);
        let req = roll(&mut s, Instant::now()).fortune_request.unwrap();
        assert!(s.apply_fortune(req.sequence, Fortune::neutral("first")));
        assert!(!s.apply_fortune(req.sequence, Fortune::neutral("second")));
        assert_eq!(s.fortune().unwrap().text, "first");
    }

    #[test]
    fn state_serializes() {
        let s = session(&[1], false);
        let json = serde_json::to_value(s.state()).unwrap();
        assert_eq!(json["die"], "d6");
        assert_eq!(json["current_value"], 1);
        assert_eq!(json["is_rolling"], false);
        assert!(json["fortune"].is_null());
    }

    proptest! {
        #[test]
        fn set_die_kind_resets_from_any_state(
            faces in prop::collection::vec(1u32..=21, 1..8),
            ops in prop::collection::vec(0u8..5, 0..40),
            target_six in any::<bool>(),
        ) {
            let mut s = session(&faces, true);
            let mut now = Instant::now();
            let mut pending: Option<FortuneRequest> = None;
            for op in ops {
                now += Duration::from_millis(150);
                match op {
                    0 => {
                        s.roll_trigger(now);
                    }
                    1 => {
                        if let Some(resolved) = s.poll(now) {
                            pending = resolved.fortune_request;
                        }
                    }
                    2 => {
                        if let Some(req) = pending.take() {
                            s.apply_fortune(req.sequence, Fortune::new("told", Tone::Lucky));
                        }
                    }
                    3 => {
                        s.toggle_ai();
                    }
                    _ => s.set_die_kind(s.die().toggled()),
                }
            }

            let target = if target_six { DieKind::Six } else { DieKind::TwentyOne };
            s.set_die_kind(target);
            let state = s.state();
            prop_assert_eq!(state.die, target);
            prop_assert_eq!(state.current_value, 1);
            prop_assert!(state.fortune.is_none());
            prop_assert!(!state.is_fortune_loading);

            if let Some(req) = pending {
                prop_assert!(!s.apply_fortune(req.sequence, Fortune::neutral("late")));
            }
        }
    }
}
