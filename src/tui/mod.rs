//! Terminal UI.
//!
//! Renders the paper deck as a fullscreen card (ratatui + crossterm) and
//! drives it from three input sources: arrow keys, the mouse wheel, and
//! vertical swipes tracked from left-button press/drag/release. The feed
//! fetch runs on a background task and lands through a channel the event
//! loop polls between frames, so the UI stays responsive while loading.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::feed::{self, FeedClient, FeedError};
use crate::models::{Paper, Session};
use crate::nav::{translate, InputEvent};
use crate::store::{Bookmarks, StateStore};

mod theme;

use theme::Theme;

/// How long one pass of the event loop waits for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Net vertical displacement, in terminal rows, that turns a drag into a swipe.
const SWIPE_THRESHOLD_ROWS: i32 = 2;

/// Runs the interactive deck UI until the user quits.
///
/// The fetch is spawned before the terminal is taken over; its result is
/// delivered over a channel that the draw loop polls. Quitting early simply
/// drops the receiver and the late result goes nowhere.
pub async fn run(
    client: FeedClient,
    category: String,
    max_results: usize,
    store: StateStore,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let result = client.fetch(&category, max_results).await.map(|mut papers| {
            feed::shuffle(&mut papers);
            papers
        });
        let _ = tx.send(result);
    });

    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(store);

    while !app.should_quit {
        app.poll_fetch(&mut rx);
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// What the main area currently shows.
#[derive(Debug)]
enum Phase {
    Loading,
    Failed(String),
    Ready(Session),
}

/// A left-button drag in flight. Only the press row matters; the release row
/// decides whether the gesture was a swipe.
#[derive(Debug, Clone, Copy)]
struct DragTrack {
    start_row: u16,
}

struct App {
    phase: Phase,
    store: StateStore,
    bookmarks: Bookmarks,
    dark_mode: bool,
    overlay_open: bool,
    overlay_state: ListState,
    toast: Option<String>,
    drag: Option<DragTrack>,
    should_quit: bool,
}

impl App {
    fn new(store: StateStore) -> Self {
        let bookmarks = store.load_bookmarks();
        let dark_mode = store.load_dark_mode();

        Self {
            phase: Phase::Loading,
            store,
            bookmarks,
            dark_mode,
            overlay_open: false,
            overlay_state: ListState::default(),
            toast: None,
            drag: None,
            should_quit: false,
        }
    }

    fn poll_fetch(&mut self, rx: &mut UnboundedReceiver<Result<Vec<Paper>, FeedError>>) {
        if !matches!(self.phase, Phase::Loading) {
            return;
        }
        if let Ok(result) = rx.try_recv() {
            self.handle_fetch_result(result);
        }
    }

    fn handle_fetch_result(&mut self, result: Result<Vec<Paper>, FeedError>) {
        match result {
            Ok(papers) => {
                tracing::info!(papers = papers.len(), "deck ready");
                self.phase = Phase::Ready(Session::new(papers));
            }
            Err(e) => {
                tracing::error!("feed load failed: {e}");
                self.phase = Phase::Failed(e.to_string());
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        self.toast = None;

        // The overlay traps the selection keys; everything else still reaches
        // the deck underneath.
        if self.overlay_open {
            match code {
                KeyCode::Esc => {
                    self.overlay_open = false;
                    return;
                }
                KeyCode::Enter => {
                    self.jump_to_selected_bookmark();
                    return;
                }
                KeyCode::Down => {
                    self.overlay_select_next();
                    return;
                }
                KeyCode::Up => {
                    self.overlay_select_prev();
                    return;
                }
                _ => {}
            }
        }

        match code {
            KeyCode::Down => self.deck_input(InputEvent::KeyDown),
            KeyCode::Up => self.deck_input(InputEvent::KeyUp),
            KeyCode::Char('b') => self.toggle_current_bookmark(),
            KeyCode::Char('l') => self.toggle_overlay(),
            KeyCode::Char('t') => self.toggle_dark_mode(),
            KeyCode::Char('o') => self.open_current_pdf(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            // Wheel events drive the deck even while the overlay is open.
            MouseEventKind::ScrollDown => {
                self.toast = None;
                self.deck_input(InputEvent::WheelDown);
            }
            MouseEventKind::ScrollUp => {
                self.toast = None;
                self.deck_input(InputEvent::WheelUp);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.toast = None;
                self.drag = Some(DragTrack {
                    start_row: mouse.row,
                });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(event) = self.finish_drag(mouse.row) {
                    self.deck_input(event);
                }
            }
            _ => {}
        }
    }

    /// Ends the drag started by the last left-button press. A release without
    /// a matching press (or one below the threshold) is not a swipe.
    fn finish_drag(&mut self, end_row: u16) -> Option<InputEvent> {
        let drag = self.drag.take()?;
        let delta = i32::from(drag.start_row) - i32::from(end_row);

        if delta >= SWIPE_THRESHOLD_ROWS {
            Some(InputEvent::SwipeUp)
        } else if delta <= -SWIPE_THRESHOLD_ROWS {
            Some(InputEvent::SwipeDown)
        } else {
            None
        }
    }

    fn deck_input(&mut self, event: InputEvent) {
        if let Phase::Ready(session) = &mut self.phase {
            session.apply(translate(event));
        }
    }

    fn toggle_current_bookmark(&mut self) {
        let Phase::Ready(session) = &self.phase else {
            return;
        };
        let Some(paper) = session.current() else {
            return;
        };

        let bookmarked = self.bookmarks.toggle(paper);
        tracing::debug!(bookmarked, title = %paper.title, "bookmark toggled");

        if let Err(e) = self.store.save_bookmarks(&self.bookmarks) {
            self.toast = Some(format!("Could not save bookmarks: {e}"));
        }
        self.clamp_overlay_selection();
    }

    fn toggle_overlay(&mut self) {
        self.overlay_open = !self.overlay_open;
        if self.overlay_open {
            let first = if self.bookmarks.is_empty() { None } else { Some(0) };
            self.overlay_state.select(first);
        }
    }

    fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        if let Err(e) = self.store.save_dark_mode(self.dark_mode) {
            self.toast = Some(format!("Could not save display mode: {e}"));
        }
    }

    fn open_current_pdf(&mut self) {
        let Phase::Ready(session) = &self.phase else {
            return;
        };
        let Some(paper) = session.current() else {
            return;
        };

        if !paper.has_pdf() {
            self.toast = Some("No PDF link for this paper".to_string());
            return;
        }

        let link = paper.pdf_link.clone();
        // open::that waits on the launcher process, so it must not occupy an
        // async worker.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = open::that(&link) {
                tracing::warn!("could not open {link}: {e}");
            }
        });
    }

    /// Moves the deck cursor to the selected bookmark. The overlay stays open
    /// when the bookmarked paper is not in the current deck.
    fn jump_to_selected_bookmark(&mut self) {
        let Some(selected) = self.overlay_state.selected() else {
            return;
        };
        let Some(paper) = self.bookmarks.papers().get(selected) else {
            return;
        };
        let Phase::Ready(session) = &mut self.phase else {
            return;
        };

        if session.jump_to_link(&paper.pdf_link) {
            self.overlay_open = false;
        }
    }

    fn overlay_select_next(&mut self) {
        let len = self.bookmarks.len();
        if len == 0 {
            return;
        }
        let next = match self.overlay_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.overlay_state.select(Some(next));
    }

    fn overlay_select_prev(&mut self) {
        let len = self.bookmarks.len();
        if len == 0 {
            return;
        }
        let prev = match self.overlay_state.selected() {
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.overlay_state.select(Some(prev));
    }

    /// Keeps the overlay selection valid after a bookmark is removed.
    fn clamp_overlay_selection(&mut self) {
        let len = self.bookmarks.len();
        if len == 0 {
            self.overlay_state.select(None);
        } else if let Some(selected) = self.overlay_state.selected() {
            self.overlay_state.select(Some(selected.min(len - 1)));
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let theme = Theme::new(app.dark_mode);
    let area = frame.size();
    frame.render_widget(Block::default().style(theme.base()), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let header_area = layout[0];
    let main_area = layout[1];
    let footer_area = layout[2];

    draw_header(frame, header_area, app, &theme);

    match &app.phase {
        Phase::Loading => draw_notice(frame, main_area, "Loading papers...", theme.base(), &theme),
        Phase::Failed(reason) => {
            draw_notice(frame, main_area, &format!("Error: {reason}"), theme.error(), &theme)
        }
        Phase::Ready(session) if session.is_empty() => {
            draw_notice(frame, main_area, "No papers found.", theme.base(), &theme)
        }
        Phase::Ready(session) => draw_card(frame, main_area, session, &app.bookmarks, &theme),
    }

    draw_footer(frame, footer_area, app, &theme);

    if app.overlay_open {
        draw_overlay(frame, main_area, app, &theme);
    }
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    frame.render_widget(Paragraph::new(header_left(theme)).style(theme.base()), area);
    frame.render_widget(
        Paragraph::new(header_right(app.bookmarks.len(), theme)).alignment(Alignment::Right),
        area,
    );
}

fn header_left(theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(" paperdeck", theme.header()),
        Span::styled(format!("  {}", theme.label()), theme.dim()),
    ])
}

fn header_right(bookmark_count: usize, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!("{bookmark_count} bookmarked "),
        theme.dim(),
    ))
}

fn draw_notice(frame: &mut Frame<'_>, area: Rect, message: &str, style: Style, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
        .style(theme.base())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered_band(area, 3));
}

fn draw_card(frame: &mut Frame<'_>, area: Rect, session: &Session, bookmarks: &Bookmarks, theme: &Theme) {
    let Some(paper) = session.current() else {
        return;
    };
    let card_area = centered_rect(80, 80, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border())
        .title(format!(" {}/{} ", session.cursor() + 1, session.len()))
        .title_alignment(Alignment::Right)
        .style(theme.base());

    let card = Paragraph::new(card_text(paper, bookmarks.contains(paper), theme))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(card, card_area);
}

fn card_text(paper: &Paper, bookmarked: bool, theme: &Theme) -> Text<'static> {
    let marker = if bookmarked {
        "★ bookmarked"
    } else {
        "☆ not bookmarked"
    };
    let link = if paper.has_pdf() {
        paper.pdf_link.clone()
    } else {
        "No PDF available".to_string()
    };

    Text::from(vec![
        Line::from(Span::styled(paper.title.clone(), theme.title())),
        Line::default(),
        Line::from(Span::styled(paper.author_line(), theme.authors())),
        Line::from(Span::styled(
            format!("Published: {}", paper.display_date()),
            theme.dim(),
        )),
        Line::default(),
        Line::from(Span::raw(paper.summary.clone())),
        Line::default(),
        Line::from(Span::styled(marker.to_string(), theme.marker(bookmarked))),
        Line::from(Span::styled(link, theme.dim())),
    ])
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let line = match &app.toast {
        Some(toast) => Line::from(Span::styled(format!(" {toast}"), theme.toast())),
        None => footer_hints(app.overlay_open, theme),
    };
    frame.render_widget(Paragraph::new(line).style(theme.base()), area);
}

fn footer_hints(overlay_open: bool, theme: &Theme) -> Line<'static> {
    let entries: &[(&str, &str)] = if overlay_open {
        &[("↑↓", "select"), ("Enter", "jump"), ("Esc", "close")]
    } else {
        &[
            ("↑↓", "browse"),
            ("b", "bookmark"),
            ("l", "bookmarks"),
            ("t", "mode"),
            ("o", "pdf"),
            ("q", "quit"),
        ]
    };

    let mut spans = vec![Span::raw(" ")];
    for (idx, (key, label)) in entries.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" │ ", theme.dim()));
        }
        spans.push(Span::styled(key.to_string(), theme.footer_key()));
        spans.push(Span::styled(format!(" {label}"), theme.footer_label()));
    }
    Line::from(spans)
}

fn draw_overlay(frame: &mut Frame<'_>, area: Rect, app: &mut App, theme: &Theme) {
    let overlay_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border())
        .title(" Bookmarked Papers ")
        .style(theme.base());

    if app.bookmarks.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled("No bookmarks yet.", theme.dim())))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(empty, overlay_area);
        return;
    }

    let items: Vec<ListItem> = app
        .bookmarks
        .papers()
        .iter()
        .map(|paper| ListItem::new(Line::from(paper.title.clone())))
        .collect();
    let list = List::new(items)
        .block(block)
        .style(theme.base())
        .highlight_style(theme.selection())
        .highlight_symbol("› ");
    frame.render_stateful_widget(list, overlay_area, &mut app.overlay_state);
}

/// Centers a rect of the given percentage size inside `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// A horizontal band of up to `height` rows, vertically centered in `area`.
fn centered_band(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = area.y + (area.height - height) / 2;
    Rect::new(area.x, top, area.width, height)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
}

#[cfg(test)]
mod tests;
