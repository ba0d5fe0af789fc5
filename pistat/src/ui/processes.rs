//! Process table with search line, sort markers, per-cell coloring and a scrollbar.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Modifier;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::ui::theme::{SB_ARROW, SB_THUMB, SB_TRACK};
use crate::ui::util::human;
use pistat::dashboard::DashboardState;
use pistat::procs::{pid_label, ProcColumn};

// Keep the header widths here so drawing and the column order match.
const COLS: [Constraint; 5] = [
    Constraint::Length(8),      // PID
    Constraint::Percentage(45), // Name
    Constraint::Length(6),      // Threads
    Constraint::Length(9),      // Mem
    Constraint::Length(8),      // CPU %
];

/// Rows available for processes inside `area` (borders, search line, header).
pub fn processes_page_size(area: Rect) -> usize {
    area.height.saturating_sub(4).max(1) as usize
}

pub fn draw_processes(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    s: &DashboardState,
    scroll_offset: usize,
    searching: bool,
) {
    let visible = s.visible_processes();
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Processes ({} active, {} shown)",
        s.processes.len(),
        visible.len()
    ));
    f.render_widget(block, area);

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height < 2 || inner.width < 3 {
        return;
    }

    // Search line
    let cursor = if searching { "█" } else { "" };
    let search_style = if searching {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = if s.search.is_empty() && !searching {
        "press / to search".to_string()
    } else {
        format!("search: {}{cursor}", s.search)
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(search, search_style))),
        Rect { height: 1, ..inner },
    );

    // Table content (reserve 2 columns for scrollbar)
    let content = Rect {
        x: inner.x,
        y: inner.y + 1,
        width: inner.width.saturating_sub(2),
        height: inner.height - 1,
    };

    let total_rows = visible.len();
    let viewport_rows = content.height.saturating_sub(1) as usize;
    let max_off = total_rows.saturating_sub(viewport_rows);
    let offset = scroll_offset.min(max_off);

    let rows = visible.iter().skip(offset).take(viewport_rows).map(|p| {
        let cpu = s.process_cpu_percent(p);
        let cpu_fg = match cpu {
            x if x < 25.0 => Color::Green,
            x if x < 60.0 => Color::Yellow,
            _ => Color::Red,
        };
        Row::new(vec![
            Cell::from(pid_label(p.pid)).style(Style::default().fg(Color::DarkGray)),
            Cell::from(p.name.clone()),
            Cell::from(format!("{}", p.threads)),
            Cell::from(human(p.mem)),
            Cell::from(format!("{cpu:>5.1}%")).style(Style::default().fg(cpu_fg)),
        ])
    });

    // Header with sort marker; empty when nothing matches
    let header_cells: Vec<String> = ProcColumn::ALL
        .iter()
        .map(|c| {
            if visible.is_empty() {
                String::new()
            } else {
                s.ordering.header_label(*c)
            }
        })
        .collect();
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, COLS.to_vec())
        .header(header)
        .column_spacing(1);
    f.render_widget(table, content);

    draw_scrollbar(f, inner, content.y, total_rows, viewport_rows, offset);
}

fn draw_scrollbar(
    f: &mut ratatui::Frame<'_>,
    inner: Rect,
    top: u16,
    total_rows: usize,
    viewport_rows: usize,
    offset: usize,
) {
    let scroll_area = Rect {
        x: inner.x + inner.width.saturating_sub(1),
        y: top,
        width: 1,
        height: inner.height.saturating_sub(top - inner.y),
    };
    if scroll_area.height < 3 {
        return;
    }
    let track = (scroll_area.height - 2) as usize;
    let total = total_rows.max(1);
    let view = viewport_rows.clamp(1, total);
    let max_off = total.saturating_sub(view);

    let thumb_len = (track * view).div_ceil(total).max(1).min(track);
    let thumb_top = if max_off == 0 {
        0
    } else {
        ((track - thumb_len) * offset + max_off / 2) / max_off
    };

    // Build lines: top arrow, track (with thumb), bottom arrow
    let mut lines: Vec<Line> = Vec::with_capacity(scroll_area.height as usize);
    lines.push(Line::from(Span::styled("▲", Style::default().fg(SB_ARROW))));
    for i in 0..track {
        if i >= thumb_top && i < thumb_top + thumb_len {
            lines.push(Line::from(Span::styled("█", Style::default().fg(SB_THUMB))));
        } else {
            lines.push(Line::from(Span::styled("│", Style::default().fg(SB_TRACK))));
        }
    }
    lines.push(Line::from(Span::styled("▼", Style::default().fg(SB_ARROW))));
    f.render_widget(Paragraph::new(lines), scroll_area);
}

/// Handle keyboard scrolling (Up/Down/PageUp/PageDown/Home/End).
/// Returns true if the key was consumed.
pub fn processes_handle_key(
    scroll_offset: &mut usize,
    key: KeyEvent,
    page_size: usize,
    total_rows: usize,
) -> bool {
    let max_off = total_rows.saturating_sub(page_size);
    match key.code {
        KeyCode::Up => *scroll_offset = scroll_offset.saturating_sub(1),
        KeyCode::Down => *scroll_offset = (*scroll_offset + 1).min(max_off),
        KeyCode::PageUp => *scroll_offset = scroll_offset.saturating_sub(page_size),
        KeyCode::PageDown => *scroll_offset = (*scroll_offset + page_size).min(max_off),
        KeyCode::Home => *scroll_offset = 0,
        KeyCode::End => *scroll_offset = max_off,
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut off = 0;
        assert!(processes_handle_key(&mut off, key(KeyCode::Up), 10, 25));
        assert_eq!(off, 0);
        processes_handle_key(&mut off, key(KeyCode::PageDown), 10, 25);
        processes_handle_key(&mut off, key(KeyCode::PageDown), 10, 25);
        assert_eq!(off, 15);
        processes_handle_key(&mut off, key(KeyCode::Home), 10, 25);
        assert_eq!(off, 0);
        processes_handle_key(&mut off, key(KeyCode::End), 10, 25);
        assert_eq!(off, 15);
        assert!(!processes_handle_key(&mut off, key(KeyCode::Char('x')), 10, 25));
    }
}
