//! Disk cards with per-filesystem gauge and title line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
};

use crate::ui::util::{disk_icon, human, truncate_middle};
use pistat::dashboard::DashboardState;
use pistat::reducers::{disk_used, disk_used_percent};

pub fn draw_disks(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Disks"), area);

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height < 3 {
        return;
    }

    let per_disk_h = 3u16;
    let max_cards = (inner.height / per_disk_h).min(s.disks.len() as u16) as usize;

    let constraints: Vec<Constraint> = (0..max_cards)
        .map(|_| Constraint::Length(per_disk_h))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (d, slot) in s.disks.iter().zip(rows.iter()) {
        let pct = disk_used_percent(d).round() as u16;
        let color = if pct < 70 {
            Color::Green
        } else if pct < 90 {
            Color::Yellow
        } else {
            Color::Red
        };

        let title = format!(
            "{} {} on {}   {} / {}  ({}%)",
            disk_icon(&d.filesystem),
            truncate_middle(&d.filesystem, (slot.width.saturating_sub(6)) as usize / 3),
            truncate_middle(&d.mountpoint, (slot.width.saturating_sub(6)) as usize / 3),
            human(disk_used(d)),
            human(d.total),
            pct
        );

        let card = Block::default().borders(Borders::ALL).title(title);
        f.render_widget(card, *slot);

        let inner_card = Rect {
            x: slot.x + 1,
            y: slot.y + 1,
            width: slot.width.saturating_sub(2),
            height: slot.height.saturating_sub(2),
        };
        if inner_card.height == 0 {
            continue;
        }

        let g = Gauge::default()
            .percent(pct.min(100))
            .gauge_style(Style::default().fg(color));
        f.render_widget(g, inner_card);
    }
}
