//! Rendering of the roller screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use fate_core::{Celebration, DieKind, Tone};

use super::app::App;
use super::face;

const FLASH_FRAME_MS: u128 = 120;

const PROGRESS_WIDTH: usize = 20;

const STATUS_HINT: &str =
    "Space:roll  \u{2190}/\u{2192}:die  f:fortune  ?:help  q:quit";

/// Accent colour for a die kind.
fn accent(die: DieKind) -> Color {
    match die {
        DieKind::Six => Color::Gray,
        DieKind::TwentyOne => Color::Magenta,
    }
}

/// Celebration palette for a die kind.
fn palette(die: DieKind) -> [Color; 3] {
    match die {
        DieKind::Six => [Color::DarkGray, Color::Gray, Color::White],
        DieKind::TwentyOne => [Color::Magenta, Color::LightMagenta, Color::White],
    }
}

/// Block bar filled to `fraction` of `width` cells.
fn progress_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Lucky => Style::default().fg(Color::Green).bold(),
        Tone::Neutral => Style::default().fg(Color::Gray),
        Tone::Ominous => Style::default().fg(Color::Red).bold(),
    }
}

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "Fate Roller",
        Style::default().fg(Color::White).bold(),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_roller(frame, app, chunks[1]);

    let status = Paragraph::new(STATUS_HINT).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[2]);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_roller(frame: &mut Frame, app: &App, area: Rect) {
    let die = app.session.die();
    let border = match app.flash {
        Some(flash) => {
            let elapsed = app.now.saturating_duration_since(flash.started).as_millis();
            let colors = palette(flash.die);
            colors[(elapsed / FLASH_FRAME_MS) as usize % colors.len()]
        }
        None => accent(die),
    };
    let block = Block::default()
        .title(format!(" {} ", die.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 4 || inner.width < 20 {
        return;
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(""));

    // Die face
    let face_style = if app.session.is_rolling() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(accent(die)).bold()
    };
    let face_lines = match die {
        DieKind::Six => face::d6_lines(app.displayed_face()),
        DieKind::TwentyOne => face::d21_lines(app.displayed_face()),
    };
    for l in face_lines {
        lines.push(Line::from(Span::styled(l, face_style)));
    }
    lines.push(Line::from(""));

    // Result
    if app.session.is_rolling() {
        lines.push(Line::from(Span::styled(
            "Rolling...",
            Style::default().fg(Color::Yellow),
        )));
        let fraction = app.session.engine().progress(app.now).unwrap_or(0.0);
        lines.push(Line::from(Span::styled(
            progress_bar(fraction, PROGRESS_WIDTH),
            Style::default().fg(accent(die)),
        )));
    } else if let Some(outcome) = app
        .session
        .engine()
        .last_outcome()
        .filter(|o| o.die == die && o.value == app.session.current_value())
    {
        lines.push(Line::from(vec![
            Span::styled("Result: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                outcome.value.to_string(),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Press Space to roll!",
            Style::default().fg(Color::Green),
        )));
    }

    if let Some(flash) = app.flash {
        let style = match flash.kind {
            Celebration::Critical => Style::default().fg(Color::Yellow).bold(),
            Celebration::Fumble => Style::default().fg(Color::Red).bold(),
        };
        lines.push(Line::from(Span::styled(flash.kind.to_string(), style)));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    // Fortune
    if !app.session.ai_enabled() {
        lines.push(Line::from(Span::styled(
            "Fortunes off (f to enable)",
            Style::default().fg(Color::DarkGray),
        )));
    } else if app.session.is_fortune_loading() {
        lines.push(Line::from(Span::styled(
            "Consulting the oracle...",
            Style::default().fg(Color::Cyan).italic(),
        )));
    } else if let Some(fortune) = app.session.fortune() {
        lines.push(Line::from(Span::styled(
            format!("\u{201c}{}\u{201d}", fortune.text),
            tone_style(fortune.tone),
        )));
        lines.push(Line::from(Span::styled(
            fortune.tone.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    } else if !app.provider_online() {
        lines.push(Line::from(Span::styled(
            "Oracle offline (set API_KEY)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    // Die selector
    let selector: Vec<Span<'static>> = DieKind::ALL
        .iter()
        .flat_map(|&kind| {
            let style = if kind == die {
                Style::default().fg(Color::Black).bg(accent(kind)).bold()
            } else {
                Style::default().fg(Color::White)
            };
            vec![Span::styled(format!(" {} ", kind.label()), style), Span::raw("  ")]
        })
        .collect();
    lines.push(Line::from(selector));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Create a centered rectangle as a percentage of the given area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("  Space / Enter / r   Roll"),
        Line::from("  \u{2190} / \u{2192} / Tab / d   Switch die"),
        Line::from("  1 / 2               Classic D6 / Mystic D21"),
        Line::from("  f                   Toggle fortunes"),
        Line::from(""),
        Line::from("  ?                   Toggle this help"),
        Line::from("  q / Esc             Quit"),
        Line::from("  Ctrl+C              Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use fate_core::{ROLL_DURATION, RollEngine, ScriptedRandom, Session};
    use fate_oracle::FortuneProvider;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app(rt: &tokio::runtime::Runtime, die: DieKind, value: u32, ai: bool) -> App {
        let engine = RollEngine::with_source(die, ScriptedRandom::constant(value));
        App::new(
            Session::new(engine, ai),
            FortuneProvider::offline(),
            rt.handle().clone(),
        )
    }

    #[test]
    fn idle_screen() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let screen = render(&app(&rt, DieKind::Six, 1, true));
        assert!(screen.contains("Fate Roller"));
        assert!(screen.contains("Classic D6"));
        assert!(screen.contains("Mystic D21"));
        assert!(screen.contains("Press Space to roll!"));
        assert!(screen.contains("Oracle offline"));
    }

    #[test]
    fn resolved_critical_screen() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, DieKind::TwentyOne, 21, false);
        let t0 = Instant::now();
        app.session.roll_trigger(t0);
        app.tick(t0 + ROLL_DURATION);

        let screen = render(&app);
        assert!(screen.contains("Result: 21"));
        assert!(screen.contains("Critical!"));
        assert!(screen.contains("Fortunes off"));
    }

    #[test]
    fn rolling_screen() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, DieKind::Six, 3, false);
        let t0 = Instant::now();
        app.session.roll_trigger(t0);
        app.tick(t0 + ROLL_DURATION / 2);
        let screen = render(&app);
        assert!(screen.contains("Rolling..."));
        let bar = format!("{}{}", "\u{2588}".repeat(10), "\u{2591}".repeat(10));
        assert!(screen.contains(&bar), "half-filled bar missing:\n{screen}");
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "\u{2591}".repeat(4));
        assert_eq!(progress_bar(1.0, 4), "\u{2588}".repeat(4));
        assert_eq!(progress_bar(7.0, 4), "\u{2588}".repeat(4));
    }

    #[test]
    fn reselecting_die_hides_old_result() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, DieKind::Six, 5, false);
        let t0 = Instant::now();
        app.session.roll_trigger(t0);
        app.tick(t0 + ROLL_DURATION);
        assert!(render(&app).contains("Result: 5"));

        app.session.set_die_kind(DieKind::Six);
        let screen = render(&app);
        assert!(!screen.contains("Result: 5"));
        assert!(screen.contains("Press Space to roll!"));
    }

    #[test]
    fn help_popup() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, DieKind::Six, 3, false);
        app.show_help = true;
        assert!(render(&app).contains("Keyboard Shortcuts"));
    }
}
