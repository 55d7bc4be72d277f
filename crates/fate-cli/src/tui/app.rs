//! Interactive roller state and input handling.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use fate_core::{Celebration, DieKind, Fortune, FortuneRequest, Session};
use fate_oracle::FortuneProvider;

/// How long the celebration flash stays on screen.
pub const CELEBRATION_FLASH: Duration = Duration::from_millis(1500);

/// A celebration currently flashing.
#[derive(Debug, Clone, Copy)]
pub struct Flash {
    /// Which extreme was hit.
    pub kind: Celebration,
    /// Die the roll was made with; selects the palette.
    pub die: DieKind,
    /// When the flash began.
    pub started: Instant,
}

/// Application state for the interactive roller.
pub struct App {
    /// The roll/fortune session.
    pub session: Session,
    provider: FortuneProvider,
    runtime: Handle,
    fortune_tx: mpsc::UnboundedSender<(u64, Fortune)>,
    fortune_rx: mpsc::UnboundedReceiver<(u64, Fortune)>,
    /// Active celebration flash.
    pub flash: Option<Flash>,
    /// Face shown while the die tumbles. Cosmetic only.
    pub tumble_face: Option<u32>,
    /// Time of the latest tick, used for animation.
    pub now: Instant,
    /// Whether the help popup is open.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create the app. Fortune requests are spawned on `runtime`.
    pub fn new(session: Session, provider: FortuneProvider, runtime: Handle) -> Self {
        let (fortune_tx, fortune_rx) = mpsc::unbounded_channel();
        Self {
            session,
            provider,
            runtime,
            fortune_tx,
            fortune_rx,
            flash: None,
            tumble_face: None,
            now: Instant::now(),
            show_help: false,
            should_quit: false,
        }
    }

    /// Whether fortunes come from the remote service.
    pub fn provider_online(&self) -> bool {
        self.provider.is_online()
    }

    /// Face to draw right now.
    pub fn displayed_face(&self) -> u32 {
        self.tumble_face
            .unwrap_or_else(|| self.session.current_value())
    }

    /// Handle a key press at `now`.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('r') => {
                self.session.roll_trigger(now);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('d') => {
                self.set_die(self.session.die().toggled());
            }
            KeyCode::Char('1') | KeyCode::Char('6') => self.set_die(DieKind::Six),
            KeyCode::Char('2') => self.set_die(DieKind::TwentyOne),
            KeyCode::Char('f') => {
                let enabled = self.session.toggle_ai();
                tracing::debug!(enabled, "fortunes toggled");
            }
            _ => {}
        }
    }

    fn set_die(&mut self, die: DieKind) {
        self.session.set_die_kind(die);
        tracing::debug!(%die, "die selected");
    }

    /// Advance timers: deliver fortunes, resolve rolls, animate.
    pub fn tick(&mut self, now: Instant) {
        self.now = now;

        while let Ok((sequence, fortune)) = self.fortune_rx.try_recv() {
            self.session.apply_fortune(sequence, fortune);
        }

        if let Some(resolved) = self.session.poll(now) {
            if let Some(kind) = resolved.resolution.celebration {
                self.flash = Some(Flash {
                    kind,
                    die: resolved.resolution.outcome.die,
                    started: now,
                });
            }
            if let Some(request) = resolved.fortune_request {
                self.request_fortune(request);
            }
        }

        if self
            .flash
            .is_some_and(|f| now.saturating_duration_since(f.started) >= CELEBRATION_FLASH)
        {
            self.flash = None;
        }

        self.tumble_face = self
            .session
            .is_rolling()
            .then(|| rand::rng().random_range(1..=self.session.die().faces()));
    }

    fn request_fortune(&self, request: FortuneRequest) {
        let provider = self.provider.clone();
        let tx = self.fortune_tx.clone();
        self.runtime.spawn(async move {
            let fortune = provider.fulfil(&request).await;
            // The receiver is gone only when the app has quit.
            let _ = tx.send((request.sequence, fortune));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fate_core::{ROLL_DURATION, RollEngine, ScriptedRandom, Tone};
    use fate_oracle::UNAVAILABLE_TEXT;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(rt: &tokio::runtime::Runtime, values: &[u32], ai: bool) -> App {
        let engine = RollEngine::with_source(DieKind::Six, ScriptedRandom::new(values.to_vec()));
        App::new(
            Session::new(engine, ai),
            FortuneProvider::offline(),
            rt.handle().clone(),
        )
    }

    /// Tick until a fortune shows up or give up after about a second.
    fn wait_for_fortune(app: &mut App) {
        for _ in 0..200 {
            app.tick(Instant::now() + ROLL_DURATION * 4);
            if app.session.fortune().is_some() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn space_rolls_and_tick_resolves() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, &[4], false);
        let t0 = Instant::now();

        app.handle_key(key(KeyCode::Char(' ')), t0);
        assert!(app.session.is_rolling());

        app.tick(t0 + Duration::from_millis(100));
        let tumbling = app.tumble_face.unwrap();
        assert!((1..=6).contains(&tumbling));

        app.tick(t0 + ROLL_DURATION);
        assert!(!app.session.is_rolling());
        assert_eq!(app.tumble_face, None);
        assert_eq!(app.displayed_face(), 4);
        assert!(app.flash.is_none());
    }

    #[test]
    fn extreme_roll_flashes_then_fades() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, &[6], false);
        let t0 = Instant::now();
        app.handle_key(key(KeyCode::Enter), t0);
        app.tick(t0 + ROLL_DURATION);

        let flash = app.flash.unwrap();
        assert_eq!(flash.kind, Celebration::Critical);
        assert_eq!(flash.die, DieKind::Six);

        app.tick(t0 + ROLL_DURATION + CELEBRATION_FLASH);
        assert!(app.flash.is_none());
    }

    #[test]
    fn fortune_arrives_after_roll() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, &[3], true);
        let t0 = Instant::now();
        app.handle_key(key(KeyCode::Char('r')), t0);
        app.tick(t0 + ROLL_DURATION);
        assert!(app.session.is_fortune_loading());

        wait_for_fortune(&mut app);
        let fortune = app.session.fortune().unwrap();
        assert_eq!(fortune.text, UNAVAILABLE_TEXT);
        assert_eq!(fortune.tone, Tone::Neutral);
    }

    #[test]
    fn die_switch_discards_pending_fortune() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, &[3], true);
        let t0 = Instant::now();
        app.handle_key(key(KeyCode::Char(' ')), t0);
        app.tick(t0 + ROLL_DURATION);
        app.handle_key(key(KeyCode::Char('2')), t0 + ROLL_DURATION);

        std::thread::sleep(Duration::from_millis(50));
        app.tick(t0 + ROLL_DURATION * 2);
        assert_eq!(app.session.die(), DieKind::TwentyOne);
        assert_eq!(app.session.current_value(), 1);
        assert!(app.session.fortune().is_none());
    }

    #[test]
    fn reselecting_current_die_resets_face_and_fortune() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, &[5], true);
        let t0 = Instant::now();
        app.handle_key(key(KeyCode::Char(' ')), t0);
        app.tick(t0 + ROLL_DURATION);
        wait_for_fortune(&mut app);
        assert_eq!(app.session.current_value(), 5);
        assert!(app.session.fortune().is_some());

        app.handle_key(key(KeyCode::Char('1')), Instant::now());
        assert_eq!(app.session.die(), DieKind::Six);
        assert_eq!(app.session.current_value(), 1);
        assert_eq!(app.displayed_face(), 1);
        assert!(app.session.fortune().is_none());
        assert!(!app.session.is_fortune_loading());
    }

    #[test]
    fn toggles_and_quit() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, &[3], true);
        let now = Instant::now();

        app.handle_key(key(KeyCode::Char('f')), now);
        assert!(!app.session.ai_enabled());

        app.handle_key(key(KeyCode::Right), now);
        assert_eq!(app.session.die(), DieKind::TwentyOne);
        app.handle_key(key(KeyCode::Char('1')), now);
        assert_eq!(app.session.die(), DieKind::Six);

        app.handle_key(key(KeyCode::Char('?')), now);
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Char('q')), now);
        assert!(!app.should_quit, "help swallows keys");
        app.handle_key(key(KeyCode::Esc), now);
        assert!(!app.show_help);

        app.handle_key(key(KeyCode::Char('q')), now);
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_help() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, &[3], false);
        app.show_help = true;
        app.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(app.should_quit);
    }
}
