//! App state and main loop: terminal input, feed frames, drawing.

use std::{cell::Cell, io, rc::Rc};

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tracing::{info, warn};
use url::Url;

use crate::ui::cpu::draw_cpu;
use crate::ui::error::draw_error;
use crate::ui::header::{draw_header, draw_tabs, LinkStatus};
use crate::ui::mem::draw_mem_tab;
use crate::ui::net::draw_net_tab;
use crate::ui::processes::{draw_processes, processes_handle_key, processes_page_size};
use pistat::dashboard::{Dashboard, FrameOutcome};
use pistat::prefs::Tab;
use pistat::procs::ProcColumn;
use pistat::selection::SwitchDirection;
use pistat::ws::{self, Frame, WsStream};

/// Feed state as the header reports it. Transport trouble is shown here,
/// it never trips the error latch.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Link {
    Waiting,
    Live,
    Closed,
    Failed(String),
}

pub struct App {
    dashboard: Dashboard,

    // set by the dashboard observer, cleared after each draw
    dirty: Rc<Cell<bool>>,

    link: Link,
    last_update: Option<String>,

    search_mode: bool,
    should_quit: bool,

    procs_scroll_offset: usize,
    last_procs_area: Option<Rect>,
}

impl App {
    pub fn new(mut dashboard: Dashboard) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        dashboard.subscribe(move |_| flag.set(true));
        Self {
            dashboard,
            dirty,
            link: Link::Waiting,
            last_update: None,
            search_mode: false,
            should_quit: false,
            procs_scroll_offset: 0,
            last_procs_area: None,
        }
    }

    pub async fn run(&mut self, url: &Url) -> Result<()> {
        // Connect to the feed
        let mut ws = ws::connect(url).await?;

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal, &mut ws).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        ws: &mut WsStream,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let mut feed_open = true;

        loop {
            if self.dirty.replace(false) {
                terminal.draw(|f| self.draw(f))?;
            }

            tokio::select! {
                ev = events.next() => match ev {
                    Some(Ok(ev)) => self.on_event(ev),
                    Some(Err(e)) => return Err(e.into()),
                    None => self.should_quit = true,
                },
                _ = tokio::signal::ctrl_c() => self.should_quit = true,
                frame = ws::next_frame(ws), if feed_open => match frame {
                    Some(Ok(frame)) => self.on_frame(frame),
                    Some(Err(e)) => {
                        warn!("feed error: {e}");
                        self.link = Link::Failed(e.to_string());
                        feed_open = false;
                        self.dirty.set(true);
                    }
                    None => {
                        info!("feed closed by peer");
                        self.link = Link::Closed;
                        feed_open = false;
                        self.dirty.set(true);
                    }
                },
            }

            if self.should_quit {
                if feed_open {
                    ws::close(ws).await;
                }
                break;
            }
        }

        Ok(())
    }

    fn on_frame(&mut self, frame: Frame) {
        let outcome = match frame {
            Frame::Text(text) => self.dashboard.apply_frame(&text),
            Frame::Binary(bytes) => self.dashboard.apply_binary_frame(&bytes),
        };
        if outcome == FrameOutcome::Applied {
            self.link = Link::Live;
            self.last_update = Some(chrono::Local::now().format("%H:%M:%S").to_string());
        }
    }

    fn on_event(&mut self, ev: Event) {
        match ev {
            Event::Key(k) if k.kind == KeyEventKind::Press => self.on_key(k),
            Event::Resize(_, _) => self.dirty.set(true),
            _ => {}
        }
    }

    fn on_key(&mut self, k: KeyEvent) {
        // raw mode delivers Ctrl-C as a key
        if k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('c')) {
            self.should_quit = true;
            return;
        }

        // A latched dashboard only takes quit
        if self.dashboard.state().error().is_some() {
            if matches!(k.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                self.should_quit = true;
            }
            return;
        }

        if self.search_mode {
            let mut search = self.dashboard.state().search.clone();
            match k.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.search_mode = false;
                    self.dirty.set(true);
                }
                KeyCode::Backspace => {
                    search.pop();
                    self.dashboard.set_search(search);
                    self.procs_scroll_offset = 0;
                }
                KeyCode::Char(c) => {
                    search.push(c);
                    self.dashboard.set_search(search);
                    self.procs_scroll_offset = 0;
                }
                _ => {}
            }
            return;
        }

        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => {
                let next = self.dashboard.state().tab.next();
                self.dashboard.set_tab(next);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.dashboard.set_tab(Tab::ALL[idx]);
            }
            KeyCode::Left => self.dashboard.cycle_interface(SwitchDirection::Back),
            KeyCode::Right => self.dashboard.cycle_interface(SwitchDirection::Forward),
            KeyCode::Char('p') => self.dashboard.sort_by(ProcColumn::Pid),
            KeyCode::Char('n') => self.dashboard.sort_by(ProcColumn::Name),
            KeyCode::Char('t') => self.dashboard.sort_by(ProcColumn::Threads),
            KeyCode::Char('m') => self.dashboard.sort_by(ProcColumn::Memory),
            KeyCode::Char('c') => self.dashboard.sort_by(ProcColumn::Cpu),
            KeyCode::Char('/') => {
                self.search_mode = true;
                self.dashboard.set_tab(Tab::Proc);
                self.dirty.set(true);
            }
            _ => {
                if self.dashboard.state().tab == Tab::Proc {
                    if let Some(area) = self.last_procs_area {
                        let total = self.dashboard.state().visible_processes().len();
                        let page = processes_page_size(area);
                        if processes_handle_key(&mut self.procs_scroll_offset, k, page, total) {
                            self.dirty.set(true);
                        }
                    }
                }
            }
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();
        let s = self.dashboard.state();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Length(1), // tabs
                Constraint::Min(5),    // body
            ])
            .split(area);

        let link = match (&self.link, self.last_update.as_deref()) {
            (Link::Failed(e), _) => LinkStatus::Failed(e),
            (Link::Closed, _) => LinkStatus::Closed,
            (Link::Live, Some(at)) => LinkStatus::Updated(at),
            _ => LinkStatus::Waiting,
        };
        draw_header(f, rows[0], s, link);

        if let Some(msg) = s.error() {
            draw_error(f, Rect::new(area.x, rows[1].y, area.width, area.height.saturating_sub(2)), msg);
            return;
        }

        draw_tabs(f, rows[1], s.tab);
        match s.tab {
            Tab::Cpu => draw_cpu(f, rows[2], s),
            Tab::Mem => draw_mem_tab(f, rows[2], s),
            Tab::Net => draw_net_tab(f, rows[2], s),
            Tab::Proc => {
                self.last_procs_area = Some(rows[2]);
                draw_processes(f, rows[2], s, self.procs_scroll_offset, self.search_mode);
            }
        }
    }
}
