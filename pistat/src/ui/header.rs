//! Top header with hostname, uptime and link status, plus the tab strip.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
};

use pistat::dashboard::DashboardState;
use pistat::prefs::Tab;

/// Connection status shown at the right of the header.
pub enum LinkStatus<'a> {
    Waiting,
    Updated(&'a str),
    Closed,
    Failed(&'a str),
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState, link: LinkStatus<'_>) {
    let link = match link {
        LinkStatus::Waiting => "waiting for data".to_string(),
        LinkStatus::Updated(at) => format!("updated {at}"),
        LinkStatus::Closed => "feed closed".to_string(),
        LinkStatus::Failed(e) => format!("connection lost: {e}"),
    };
    let title = match &s.host {
        Some(h) => format!(
            "pistat — {} | up {} | {}  (press 'q' to quit)",
            h.hostname,
            h.uptime_label(),
            link
        ),
        None => format!("pistat — {link}  (press 'q' to quit)"),
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}

pub fn draw_tabs(f: &mut ratatui::Frame<'_>, area: Rect, active: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, area);
}
