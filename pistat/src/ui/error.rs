//! Full-screen error box shown once the feed has been rejected.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ui::theme::{ERROR_BG, ERROR_FG};

pub fn draw_error(f: &mut ratatui::Frame<'_>, area: Rect, message: &str) {
    // longer messages get a taller box
    let height = if message.len() >= 300 { 60 } else { 40 };
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height) / 2),
            Constraint::Percentage(height),
            Constraint::Min(0),
        ])
        .split(area);
    let h = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Min(0),
        ])
        .split(v[1]);

    let p = Paragraph::new(message.to_string())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Feed stopped (press 'q' to quit)"),
        )
        .style(
            Style::default()
                .bg(ERROR_BG)
                .fg(ERROR_FG)
                .add_modifier(Modifier::BOLD),
        )
        .wrap(Wrap { trim: true })
        .centered();
    f.render_widget(p, h[1]);
}
