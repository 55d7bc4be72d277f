//! Roll engine and session state for Fate Roller.
//!
//! Provides the two die kinds (Classic D6 and Mystic D21), the timed roll
//! engine with its injectable random source, and the session controller
//! that ties a resolved roll to an optional fortune.

pub mod die;
pub mod engine;
pub mod error;
pub mod fortune;
pub mod outcome;
pub mod random;
pub mod session;

pub use die::DieKind;
pub use engine::{ROLL_DURATION, Resolution, RollEngine};
pub use error::{CoreError, CoreResult};
pub use fortune::{Fortune, Tone};
pub use outcome::{Celebration, RollOutcome};
pub use random::{RandomSource, ScriptedRandom, ThreadRandom};
pub use session::{FortuneRequest, Resolved, Session, SessionState};
