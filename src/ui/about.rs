use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use speedy::about::{Profile, PROFILE};
use webbrowser::Browser;

fn profile_lines(profile: &Profile) -> Vec<Line<'static>> {
    let accent = Style::default().fg(Color::Magenta);
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::Gray);

    let mut lines = vec![
        Line::from(Span::styled(
            profile.name,
            accent.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(profile.title, dim)),
        Line::from(""),
        Line::from(profile.bio),
        Line::from(""),
    ];

    lines.push(Line::from(
        profile
            .cards
            .iter()
            .map(|card| format!("{}: {}", card.title, card.body))
            .join("  |  "),
    ));
    lines.push(Line::from(""));

    for skill in profile.skills {
        lines.push(Line::from(Span::styled(skill.title, heading)));
        lines.push(Line::from(Span::styled(skill.body, dim)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Featured Projects", accent.add_modifier(Modifier::BOLD))));
    for project in profile.projects {
        lines.push(Line::from(Span::styled(project.name, heading)));
        lines.push(Line::from(Span::styled(project.blurb, dim)));
        lines.push(Line::from(Span::styled(project.url, accent)));
    }

    lines
}

fn links_legend(profile: &Profile) -> String {
    let links = if Browser::is_available() {
        profile
            .links
            .iter()
            .map(|l| format!("({}) {}", l.key, l.label))
            .join(" / ")
    } else {
        profile
            .links
            .iter()
            .map(|l| format!("{}: {}", l.label, l.url))
            .join("  ")
    };
    format!("{links}\n(b)ack / (esc)ape")
}

pub fn render_about(f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let body = Paragraph::new(profile_lines(&PROFILE))
        .block(Block::default().borders(Borders::ALL).title("About"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(body, chunks[0]);

    let legend = Paragraph::new(links_legend(&PROFILE))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(legend, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_profile_lines_cover_sections() {
        let text = profile_lines(&PROFILE)
            .iter()
            .map(|l| l.to_string())
            .join("\n");
        assert!(text.contains("Arhaan Girdhar"));
        assert!(text.contains("Education: B.Tech in Computer Science"));
        assert!(text.contains("Problem Solving"));
        assert!(text.contains("Featured Projects"));
        assert!(text.contains("https://www.arhaanportfolio.in"));
    }

    #[test]
    fn test_links_legend_has_back() {
        assert!(links_legend(&PROFILE).contains("(b)ack"));
    }

    #[test]
    fn test_render_about() {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(render_about).unwrap();

        let rendered = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(rendered.contains("About"));
        assert!(rendered.contains("Arhaan Girdhar"));
    }
}
