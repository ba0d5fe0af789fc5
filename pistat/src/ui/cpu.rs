//! CPU average sparkline + per-core gauges.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Sparkline},
};

use pistat::dashboard::DashboardState;

fn load_color(pct: f64) -> Color {
    match pct {
        x if x < 25.0 => Color::Green,
        x if x < 60.0 => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn draw_cpu(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    draw_cpu_avg_graph(f, cols[0], s);
    draw_per_core_bars(f, cols[1], s);
}

fn draw_cpu_avg_graph(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState) {
    let now = s.cpu.aggregate().map(|c| c.busy_percent());
    let temp = s
        .temp
        .map(|t| format!(" | {t}°C"))
        .unwrap_or_default();
    let title = match now {
        Some(pct) => format!("CPU avg (now: {pct:>5.1}%){temp}"),
        None => format!("CPU avg{temp}"),
    };
    let max_points = area.width.saturating_sub(2) as usize;
    let hist = &s.cpu.avg_history;
    let start = hist.len().saturating_sub(max_points);
    let data: Vec<u64> = hist.iter().skip(start).cloned().collect();
    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&data)
        .max(100)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(spark, area);
}

fn draw_per_core_bars(f: &mut ratatui::Frame<'_>, area: Rect, s: &DashboardState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Per-core"), area);
    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    let cores = s.cpu.per_core();
    if inner.height == 0 || cores.is_empty() {
        return;
    }

    let show_n = (inner.height as usize).min(cores.len());
    let constraints: Vec<Constraint> = (0..show_n).map(|_| Constraint::Length(1)).collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, core) in cores.iter().take(show_n).enumerate() {
        let pct = core.busy_percent().clamp(0.0, 100.0);
        let g = Gauge::default()
            .gauge_style(Style::default().fg(load_color(pct)))
            .percent(pct.round() as u16)
            .label(format!("core {:<2} {:>5.1}%", i + 1, pct));
        f.render_widget(g, rows[i]);
    }
}
