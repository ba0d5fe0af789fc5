//! Memory gauge and breakdown.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::ui::disks::draw_disks;
use crate::ui::util::human;
use pistat::dashboard::DashboardState;
use pistat::reducers::ram_used_percent;

pub fn draw_mem_tab(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(4), Constraint::Min(3)])
        .split(area);
    draw_mem(f, rows[0], s);
    draw_mem_details(f, rows[1], s);
    draw_disks(f, rows[2], s);
}

fn draw_mem(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState) {
    let r = &s.ram;
    let pct = ram_used_percent(r).clamp(0.0, 100.0) as u16;
    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Memory"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(pct)
        .label(format!("{} / {}", human(r.used), human(r.total)));
    f.render_widget(g, area);
}

fn draw_mem_details(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState) {
    let r = &s.ram;
    let lines = vec![
        Line::from(format!(
            "available {:>8}   free {:>8}",
            human(r.available),
            human(r.free)
        )),
        Line::from(format!("cached    {:>8}", human(r.cached))),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}
