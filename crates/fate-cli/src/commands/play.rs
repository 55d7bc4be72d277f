use fate_core::{DieKind, RollEngine, Session};
use fate_oracle::{FortuneProvider, OracleConfig};

use crate::tui::App;

/// Options for `fate play`.
pub struct PlayOptions {
    pub die: DieKind,
    pub fortune: bool,
}

/// Run the interactive roller until the user quits.
pub fn run(opts: PlayOptions, config: OracleConfig) -> Result<(), String> {
    let rt = super::runtime()?;
    let provider = FortuneProvider::new(&config);
    let session = Session::new(RollEngine::new(opts.die), opts.fortune);
    let app = App::new(session, provider, rt.handle().clone());
    crate::tui::run(app)
}
