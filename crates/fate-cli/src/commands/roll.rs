use std::time::{Duration, Instant};

use colored::Colorize;
use serde::Serialize;

use fate_core::{
    Celebration, DieKind, Fortune, ROLL_DURATION, RollEngine, RollOutcome, Session, Tone,
};
use fate_oracle::{FortuneProvider, OracleConfig};

/// Options for `fate roll`.
pub struct RollOptions {
    pub die: DieKind,
    pub fortune: bool,
    pub json: bool,
    pub instant: bool,
}

#[derive(Serialize)]
struct RollReport<'a> {
    #[serde(flatten)]
    outcome: &'a RollOutcome,
    celebration: Option<Celebration>,
    fortune: Option<&'a Fortune>,
}

pub fn run(opts: RollOptions, config: OracleConfig) -> Result<(), String> {
    let rt = super::runtime()?;
    rt.block_on(roll_once(opts, config))
}

async fn roll_once(opts: RollOptions, config: OracleConfig) -> Result<(), String> {
    let duration = if opts.instant {
        Duration::ZERO
    } else {
        ROLL_DURATION
    };
    let engine = RollEngine::new(opts.die).with_roll_duration(duration);
    let mut session = Session::new(engine, opts.fortune);

    session.roll_trigger(Instant::now());
    if let Some(deadline) = session.engine().deadline() {
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
    }
    let resolved = session
        .poll(Instant::now())
        .ok_or_else(|| "roll did not resolve".to_string())?;

    if let Some(request) = resolved.fortune_request {
        let provider = FortuneProvider::new(&config);
        let fortune = provider.fulfil(&request).await;
        session.apply_fortune(request.sequence, fortune);
    }

    let outcome = &resolved.resolution.outcome;
    let celebration = resolved.resolution.celebration;

    if opts.json {
        let report = RollReport {
            outcome,
            celebration,
            fortune: session.fortune(),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("serialization error: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "  {} rolled {}",
        outcome.die.label(),
        outcome.value.to_string().bold()
    );
    match celebration {
        Some(Celebration::Critical) => println!("  {}", "Critical!".yellow().bold()),
        Some(Celebration::Fumble) => println!("  {}", "Fumble!".red().bold()),
        None => {}
    }
    if let Some(fortune) = session.fortune() {
        let text = format!("\"{}\"", fortune.text);
        let styled = match fortune.tone {
            Tone::Lucky => text.green(),
            Tone::Neutral => text.normal(),
            Tone::Ominous => text.red(),
        };
        println!("  {styled} {}", format!("({})", fortune.tone).dimmed());
    }
    Ok(())
}
