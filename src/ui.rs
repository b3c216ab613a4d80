pub mod screen;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use typoslinger::{
    i18n::{tr, Key},
    language::normalize_token,
    util::format_time,
    GameSummary, RoundEngine, RoundState,
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const PLAYING_HELP: &str =
    "←/→ aim · enter shoot · 1-9 quick draw · h hint · p pause · a audio · ? help · esc quit";

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Splits `area` into header / body / footer rows, body vertically centered.
fn frame_rows(area: Rect, body_height: u16) -> [Rect; 5] {
    let spare = area
        .height
        .saturating_sub(body_height + 4 + VERTICAL_MARGIN * 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(spare / 2),
            Constraint::Length(body_height),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3], chunks[4]]
}

fn notice_line(app: &App) -> Line<'static> {
    match app.notice {
        Some(notice) => Line::from(Span::styled(
            tr(app.language(), notice.key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )),
        None => Line::default(),
    }
}

pub fn render_home(app: &App, f: &mut Frame) {
    let lang = app.language();
    let title_style = bold().fg(Color::Yellow);

    let mut lines = vec![
        Line::from(Span::styled(tr(lang, Key::Title), title_style)),
        Line::default(),
        Line::from(Span::styled(tr(lang, Key::WelcomeText), Style::default())),
        Line::default(),
        Line::from(vec![
            Span::styled("enter ", bold().fg(Color::Green)),
            Span::raw(tr(lang, Key::Start)),
        ]),
        Line::from(vec![
            Span::styled("l ", bold()),
            Span::raw(format!("{}: {}", tr(lang, Key::Language), lang.native_name())),
        ]),
        Line::from(vec![
            Span::styled("a ", bold()),
            Span::raw(format!("{}: {}", tr(lang, Key::Audio), on_off(app.config.audio_enabled))),
        ]),
        Line::from(vec![
            Span::styled("? ", bold()),
            Span::raw(tr(lang, Key::HowToPlayTitle)),
        ]),
        Line::from(vec![
            Span::styled("q ", bold()),
            Span::raw(tr(lang, Key::Quit)),
        ]),
    ];
    if let Some(streak) = app.streak.filter(|s| *s > 0) {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(format!("🔥 {streak}"), dim())));
    }

    let rows = frame_rows(f.area(), lines.len() as u16);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(notice_line(app)).alignment(Alignment::Center),
        rows[4],
    );
}

pub fn render_how_to_play(app: &App, f: &mut Frame) {
    let lang = app.language();
    let lines: Vec<Line> = [
        Key::Instruction1,
        Key::Instruction2,
        Key::Instruction3,
        Key::Instruction4,
    ]
    .iter()
    .enumerate()
    .map(|(i, key)| {
        Line::from(vec![
            Span::styled(format!("{}. ", i + 1), bold()),
            Span::raw(tr(lang, *key)),
        ])
    })
    .collect();

    let rows = frame_rows(f.area(), lines.len() as u16 + 2);
    f.render_widget(
        Paragraph::new(Span::styled(tr(lang, Key::HowToPlayTitle), bold().fg(Color::Yellow)))
            .alignment(Alignment::Center),
        rows[0],
    );
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[2]);
    f.render_widget(
        Paragraph::new(Span::styled("esc back", dim())).alignment(Alignment::Center),
        rows[4],
    );
}

/// One glyph per round: settled rounds show hit or miss, the current one is highlighted.
fn chamber_strip(engine: &RoundEngine) -> Line<'static> {
    let session = engine.session();
    let spans = (0..session.round_count)
        .map(|i| match session.round_results.get(i) {
            Some(r) if r.hit => Span::styled("● ", bold().fg(Color::Green)),
            Some(_) => Span::styled("✗ ", bold().fg(Color::Red)),
            None if i == session.current_round_index => Span::styled("◉ ", bold()),
            None => Span::styled("○ ", dim()),
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn sentence_line(engine: &RoundEngine, cursor: usize) -> Line<'static> {
    let Some(sentence) = engine.current_sentence() else {
        return Line::default();
    };
    let hint = &engine.session().hint;
    let resolving = match engine.state() {
        RoundState::Resolving {
            phase,
            hit,
            selected,
        } => Some((phase, hit, selected)),
        _ => None,
    };

    let mut spans = Vec::new();
    for (i, token) in sentence.tokens().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let misspelled = sentence.is_misspelled(token);

        let (text, style) = match resolving {
            Some((phase, hit, selected)) => {
                let text = if misspelled && phase.shows_correction() {
                    token.replacen(normalize_token(token), &sentence.corrected_token, 1)
                } else {
                    token.to_string()
                };
                let style = if i == selected {
                    bold().fg(if hit { Color::Green } else { Color::Red })
                } else if misspelled && phase.shows_correction() {
                    bold().fg(Color::Green)
                } else if misspelled && phase.marker_visible() {
                    bold().fg(Color::Yellow)
                } else {
                    dim()
                };
                // Marker sits on the misspelled word whether or not it was the one shot
                let text = if misspelled && phase.marker_visible() {
                    format!("⌖{text}")
                } else {
                    text
                };
                (text, style)
            }
            None if !hint.is_clickable(i) => (token.to_string(), dim()),
            None if i == cursor && !engine.is_paused() => (
                token.to_string(),
                bold().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ),
            None => (token.to_string(), bold()),
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

pub fn render_playing(app: &App, f: &mut Frame) {
    let Some(engine) = app.engine.as_ref() else {
        return;
    };
    let lang = app.language();
    let session = engine.session();

    let sentence = sentence_line(engine, app.cursor);
    let max_width = f.area().width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1) as usize;
    let sentence_rows = (sentence.width().div_ceil(max_width)).max(1) as u16;

    let rows = frame_rows(f.area(), sentence_rows + 4);

    let round = (session.current_round_index + 1).min(session.round_count);
    let header = Line::from(vec![
        Span::styled(tr(lang, Key::Title), bold().fg(Color::Yellow)),
        Span::raw(format!("  {}/{}  ", round, session.round_count)),
        Span::styled(format_time(engine.elapsed_seconds()), bold()),
        Span::styled(
            format!("  {} {}", tr(lang, Key::Audio), on_off(engine.audio().is_enabled())),
            dim(),
        ),
    ]);
    f.render_widget(Paragraph::new(header).alignment(Alignment::Center), rows[0]);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(sentence_rows),
            Constraint::Length(1),
        ])
        .split(rows[2]);

    f.render_widget(
        Paragraph::new(chamber_strip(engine)).alignment(Alignment::Center),
        body[0],
    );
    f.render_widget(
        Paragraph::new(sentence)
            .alignment(if sentence_rows == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true }),
        body[2],
    );
    if session.hint.active {
        f.render_widget(
            Paragraph::new(Span::styled("💡", dim())).alignment(Alignment::Center),
            body[3],
        );
    }

    let footer = vec![notice_line(app), Line::from(Span::styled(PLAYING_HELP, dim()))];
    f.render_widget(
        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[4],
    );

    if engine.is_paused() {
        render_paused_overlay(app, f);
    }
}

fn render_paused_overlay(app: &App, f: &mut Frame) {
    let lang = app.language();
    let title = tr(lang, Key::GamePaused);
    let resume = format!("p {}", tr(lang, Key::Resume));
    let width = (title.width().max(resume.width()) as u16 + 6).min(f.area().width);
    let height = 4.min(f.area().height);
    let area = Rect {
        x: f.area().x + (f.area().width.saturating_sub(width)) / 2,
        y: f.area().y + (f.area().height.saturating_sub(height)) / 2,
        width,
        height,
    };

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(title, bold().fg(Color::Yellow))),
            Line::from(Span::styled(resume, dim())),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn summary_lines(app: &App, summary: &GameSummary) -> Vec<Line<'static>> {
    let lang = app.language();
    let rounds = summary
        .round_results
        .iter()
        .flat_map(|r| {
            let glyph = if r.hit {
                Span::styled("● ", bold().fg(Color::Green))
            } else {
                Span::styled("✗ ", bold().fg(Color::Red))
            };
            if r.used_hint {
                vec![glyph, Span::styled("💡 ", dim())]
            } else {
                vec![glyph]
            }
        })
        .collect::<Vec<_>>();

    let mut lines = vec![
        Line::from(Span::styled(tr(lang, Key::Title), bold().fg(Color::Yellow))),
        Line::default(),
        Line::from(Span::styled(
            format!("🎯 {}/{}", summary.hits, summary.round_count()),
            bold().fg(if summary.is_perfect() {
                Color::Green
            } else {
                Color::White
            }),
        )),
        Line::from(Span::styled(
            format!("⏱  {}", format_time(summary.elapsed_seconds)),
            bold(),
        )),
        Line::from(Span::raw(format!(
            "{}: {}",
            tr(lang, Key::Score),
            summary.score()
        ))),
        Line::from(rounds),
    ];
    if let Some(streak) = app.streak.filter(|s| *s > 0) {
        lines.push(Line::from(Span::styled(format!("🔥 {streak}"), dim())));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        tr(lang, Key::ComeBackMessage),
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    lines
}

pub fn render_game_over(app: &App, f: &mut Frame) {
    let Some(summary) = app.summary.as_ref() else {
        return;
    };
    let lines = summary_lines(app, summary);
    let rows = frame_rows(f.area(), lines.len() as u16);

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[2],
    );

    let lang = app.language();
    let footer = vec![
        notice_line(app),
        Line::from(vec![
            Span::styled("c ", bold()),
            Span::styled(tr(lang, Key::ShareResults), dim()),
            Span::styled("  n ", bold()),
            Span::styled(tr(lang, Key::Start), dim()),
            Span::styled("  q ", bold()),
            Span::styled(tr(lang, Key::Quit), dim()),
        ]),
    ];
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), rows[4]);
}
