//! Network pane: interface selector and download/upload sparklines.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
};

use crate::ui::theme::{NET_DOWN, NET_UP};
use crate::ui::util::{human, human_rate};
use pistat::dashboard::DashboardState;
use pistat::net::NetValues;

pub fn draw_net_tab(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState) {
    let view = s.net_view();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(50),
            Constraint::Min(3),
        ])
        .split(area);

    let prev = if view.has_prev { "ᐸ " } else { "  " };
    let next = if view.has_next { " ᐳ" } else { "  " };
    let name = view.interface.as_deref().unwrap_or("no interface");
    let selector = Line::from(vec![
        Span::styled(prev, Style::default().fg(Color::Gray)),
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(next, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(selector).centered(), rows[0]);

    let latest = view.speeds.last().copied().unwrap_or_default();
    let max = view.max.ceil() as u64;
    draw_net_spark(
        f,
        rows[1],
        &format!(
            "▼ {} | total {}",
            human_rate(latest.download),
            human(view.totals.download)
        ),
        &view.speeds,
        |v| v.download,
        max,
        NET_DOWN,
    );
    draw_net_spark(
        f,
        rows[2],
        &format!(
            "▲ {} | total {}",
            human_rate(latest.upload),
            human(view.totals.upload)
        ),
        &view.speeds,
        |v| v.upload,
        max,
        NET_UP,
    );
}

fn draw_net_spark(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    speeds: &[NetValues],
    pick: fn(&NetValues) -> f64,
    max: u64,
    color: Color,
) {
    let max_points = area.width.saturating_sub(2) as usize;
    let start = speeds.len().saturating_sub(max_points);
    let data: Vec<u64> = speeds
        .iter()
        .skip(start)
        .map(|v| pick(v).max(0.0).round() as u64)
        .collect();

    // both charts share the interface maximum so they stay comparable
    let spark = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        )
        .data(&data)
        .max(max.max(1))
        .style(Style::default().fg(color));
    f.render_widget(spark, area);
}
