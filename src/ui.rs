pub mod about;
pub mod charting;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
    Frame,
};
use speedy::{
    clock::{Clock, Randomness},
    history::{BestComparison, History},
    reaction::Status,
    session::SessionSnapshot,
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw<C: Clock, R: Randomness>(app: &App<C, R>, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}

fn body_color(status: Status) -> Color {
    match status {
        Status::Intro => Color::Magenta,
        Status::Ready => Color::Red,
        Status::Countdown => Color::Yellow,
        Status::Waiting => Color::Green,
        Status::Result => Color::DarkGray,
        Status::TooEarly => Color::LightRed,
    }
}

fn legend(status: Status) -> &'static str {
    match status {
        Status::Intro => "(a)bout / (esc)ape",
        Status::Ready => "(space/click/enter) start / (a)bout / (esc)ape",
        Status::Countdown | Status::Waiting => "(space/click) click / (esc)ape",
        Status::Result | Status::TooEarly => "(enter/r) try again / (a)bout / (esc)ape",
    }
}

fn body_lines<C: Clock, R: Randomness>(app: &App<C, R>, snap: &SessionSnapshot) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    match snap.status {
        Status::Intro => {
            let count = if snap.intro_countdown == 0 {
                "GO!".to_string()
            } else {
                snap.intro_countdown.to_string()
            };
            vec![
                Line::from("Let's see how fast you are in..."),
                Line::from(""),
                Line::from(Span::styled(count, bold)),
            ]
        }
        Status::Ready => vec![Line::from(Span::styled("START", bold))],
        Status::Countdown => vec![
            Line::from(Span::styled(
                snap.countdown_display_seconds.unwrap_or(1).to_string(),
                bold,
            )),
            Line::from("seconds"),
        ],
        Status::Waiting => vec![Line::from(Span::styled("Click now!", bold))],
        Status::Result => {
            let ms = snap.last_reaction_ms.unwrap_or_default();
            let mut lines = vec![
                Line::from(Span::styled(format!("{ms}ms"), bold)),
                Line::from(""),
            ];
            if let Some(tier) = snap.feedback() {
                lines.push(Line::from(vec![
                    Span::raw(tier.emoji()),
                    Span::raw("  "),
                    Span::styled(tier.label(), bold),
                ]));
            }
            if let Some(cmp) = app.timer.comparison() {
                let style = match cmp {
                    BestComparison::NewBest => Style::default().fg(Color::LightGreen).patch(bold),
                    _ => Style::default().fg(Color::Gray),
                };
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(cmp.describe(), style)));
            }
            lines
        }
        Status::TooEarly => vec![
            Line::from(Span::styled("Get Better...", bold)),
            Line::from("too early!"),
            Line::from(""),
            Line::from("😅"),
        ],
    }
}

/// Past results with the best highlighted, then the best and a summary
fn history_lines(history: &History, recent: usize) -> Vec<Line<'static>> {
    let Some(summary) = history.summary() else {
        return vec![];
    };

    let best_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD);

    let mut pills = vec![];
    for &ms in history.recent(recent) {
        let style = if history.is_best(ms) {
            best_style
        } else {
            Style::default().fg(Color::Gray)
        };
        pills.push(Span::styled(format!(" {ms}ms "), style));
        pills.push(Span::raw(" "));
    }

    vec![
        Line::from(Span::styled(
            "Past Results:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(pills),
        Line::from(Span::styled(
            format!("Best: {}ms", summary.best),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} rounds   {:.0}ms avg   {:.1} sd",
                summary.rounds, summary.mean, summary.std_dev
            ),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        )),
    ]
}

fn render_history_chart(history: &[u64], area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let points = charting::history_points(history);
    let (rounds, slowest) = charting::compute_chart_params(&points);

    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("round")
                .bounds([1.0, rounds])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(charting::format_label(rounds), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("ms")
                .bounds([0.0, slowest])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(slowest), bold_style),
                ]),
        )
        .render(area, buf);
}

impl<C: Clock, R: Randomness> Widget for &App<C, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.timer.snapshot();
        let show_history = snap.status == Status::Ready && !snap.history.is_empty();
        let show_chart = show_history && snap.history.len() > 1;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(2), // headline
                Constraint::Min(5),    // body
                Constraint::Length(if show_history { 5 } else { 0 }),
                Constraint::Length(if show_chart { 8 } else { 0 }),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Speedy",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            snap.headline(),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let body = body_lines(self, &snap);
        let padding = chunks[2]
            .height
            .saturating_sub(2)
            .saturating_sub(body.len() as u16)
            / 2;
        let mut lines = vec![Line::from(""); padding as usize];
        lines.extend(body);

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(body_color(snap.status)).fg(Color::White)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        if show_history {
            Paragraph::new(history_lines(snap.history, self.config.recent_results))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[3], buf);
        }

        if show_chart {
            render_history_chart(snap.history.as_slice(), chunks[4], buf);
        }

        Paragraph::new(Span::styled(
            legend(snap.status),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[5], buf);
    }
}
