use super::{
    card_text, centered_band, centered_rect, footer_hints, header_left, header_right, App, Phase,
    Theme,
};
use crate::feed::FeedError;
use crate::models::Paper;
use crate::store::StateStore;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::path::PathBuf;
use tempfile::TempDir;

fn paper(title: &str, link: &str) -> Paper {
    Paper {
        title: title.to_string(),
        summary: format!("{title} summary"),
        published: "2026-08-12T00:00:00Z".to_string(),
        authors: vec!["Alice Smith".to_string()],
        pdf_link: link.to_string(),
    }
}

fn three_papers() -> Vec<Paper> {
    vec![
        paper("Deck A", "http://example.org/a.pdf"),
        paper("Deck B", "http://example.org/b.pdf"),
        paper("Deck C", "http://example.org/c.pdf"),
    ]
}

fn state_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("state")
}

fn ready_app(papers: Vec<Paper>) -> (App, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut app = App::new(StateStore::new(state_dir(&dir)));
    app.handle_fetch_result(Ok(papers));
    (app, dir)
}

fn cursor(app: &App) -> usize {
    match &app.phase {
        Phase::Ready(session) => session.cursor(),
        _ => panic!("deck not ready"),
    }
}

fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column: 0,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn line_to_string(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
}

fn text_to_string(text: &ratatui::text::Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_arrow_keys_move_the_deck_circularly() {
    let (mut app, _dir) = ready_app(three_papers());
    assert_eq!(cursor(&app), 0);

    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Down);
    assert_eq!(cursor(&app), 2);

    app.handle_key(KeyCode::Down);
    assert_eq!(cursor(&app), 0);

    app.handle_key(KeyCode::Up);
    assert_eq!(cursor(&app), 2);
}

#[test]
fn test_wheel_and_swipe_share_the_direction_mapping() {
    let (mut app, _dir) = ready_app(three_papers());

    app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0));
    assert_eq!(cursor(&app), 1);

    // Swipe up: press low on the screen, release higher.
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5));
    assert_eq!(cursor(&app), 2);

    // Swipe down goes back.
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10));
    assert_eq!(cursor(&app), 1);

    app.handle_mouse(mouse(MouseEventKind::ScrollUp, 0));
    assert_eq!(cursor(&app), 0);
}

#[test]
fn test_short_drag_is_not_a_swipe() {
    let (mut app, _dir) = ready_app(three_papers());

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 9));
    assert_eq!(cursor(&app), 0);

    // A release without a matching press does nothing.
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0));
    assert_eq!(cursor(&app), 0);
}

#[test]
fn test_single_paper_deck_stays_put() {
    let (mut app, _dir) = ready_app(vec![paper("Solo", "http://example.org/solo.pdf")]);

    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Up);
    assert_eq!(cursor(&app), 0);
}

#[test]
fn test_navigation_is_ignored_while_loading_and_on_an_empty_deck() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut app = App::new(StateStore::new(state_dir(&dir)));

    app.handle_key(KeyCode::Down);
    assert!(matches!(app.phase, Phase::Loading));

    app.handle_fetch_result(Ok(Vec::new()));
    app.handle_key(KeyCode::Down);
    app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0));
    match &app.phase {
        Phase::Ready(session) => assert!(session.is_empty()),
        other => panic!("unexpected phase: {other:?}"),
    }
}

#[test]
fn test_failed_fetch_keeps_the_reason() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut app = App::new(StateStore::new(state_dir(&dir)));

    app.handle_fetch_result(Err(FeedError::Network(
        "Network response was not ok".to_string(),
    )));
    match &app.phase {
        Phase::Failed(reason) => assert!(reason.contains("Network response was not ok")),
        other => panic!("unexpected phase: {other:?}"),
    }
}

#[test]
fn test_bookmark_toggle_persists_across_sessions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let papers = three_papers();

    let mut app = App::new(StateStore::new(state_dir(&dir)));
    app.handle_fetch_result(Ok(papers.clone()));
    app.handle_key(KeyCode::Char('b'));
    assert_eq!(app.bookmarks.len(), 1);
    assert!(app.bookmarks.contains(&papers[0]));

    // A fresh session over the same state directory sees the bookmark.
    let mut again = App::new(StateStore::new(state_dir(&dir)));
    assert_eq!(again.bookmarks.len(), 1);
    assert!(again.bookmarks.contains(&papers[0]));

    // Toggling it off persists the removal as well.
    again.handle_fetch_result(Ok(papers.clone()));
    again.handle_key(KeyCode::Char('b'));
    assert!(again.bookmarks.is_empty());

    let last = App::new(StateStore::new(state_dir(&dir)));
    assert!(last.bookmarks.is_empty());
}

#[test]
fn test_failed_bookmark_save_shows_a_toast_until_the_next_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    // A plain file where the state directory should be makes every save fail.
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"not a directory").expect("write blocker");

    let mut app = App::new(StateStore::new(blocked.join("state")));
    app.handle_fetch_result(Ok(three_papers()));

    app.handle_key(KeyCode::Char('b'));
    assert!(app.toast.as_deref().unwrap_or_default().contains("Could not save bookmarks"));

    // The bookmark still toggled in memory; only the write failed.
    assert_eq!(app.bookmarks.len(), 1);

    app.handle_key(KeyCode::Down);
    assert!(app.toast.is_none());
}

#[test]
fn test_dark_mode_toggle_persists() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut app = App::new(StateStore::new(state_dir(&dir)));
    assert!(!app.dark_mode);
    app.handle_key(KeyCode::Char('t'));
    assert!(app.dark_mode);

    let again = App::new(StateStore::new(state_dir(&dir)));
    assert!(again.dark_mode);
}

#[test]
fn test_open_without_a_pdf_link_shows_a_toast() {
    let (mut app, _dir) = ready_app(vec![paper("Linkless", "")]);

    app.handle_key(KeyCode::Char('o'));
    assert_eq!(app.toast.as_deref(), Some("No PDF link for this paper"));
}

// The launch is handed to the blocking pool, so the handler needs a runtime
// underneath it.
#[tokio::test]
async fn test_open_with_a_pdf_link_leaves_the_session_running() {
    let (mut app, _dir) = ready_app(vec![paper("Linked", "http://example.org/linked.pdf")]);

    app.handle_key(KeyCode::Char('o'));
    assert!(app.toast.is_none());
    assert!(!app.should_quit);
    assert_eq!(cursor(&app), 0);
}

#[test]
fn test_overlay_jump_moves_the_cursor_and_closes() {
    let (mut app, _dir) = ready_app(three_papers());

    // Bookmark the third paper, then move away from it.
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Char('b'));
    app.handle_key(KeyCode::Down);
    assert_eq!(cursor(&app), 0);

    app.handle_key(KeyCode::Char('l'));
    assert!(app.overlay_open);
    assert_eq!(app.overlay_state.selected(), Some(0));

    app.handle_key(KeyCode::Enter);
    assert_eq!(cursor(&app), 2);
    assert!(!app.overlay_open);
}

#[test]
fn test_overlay_jump_to_a_paper_outside_the_deck_keeps_it_open() {
    let (mut app, _dir) = ready_app(three_papers());
    app.handle_key(KeyCode::Char('b'));

    // A reloaded deck no longer contains the bookmarked paper.
    app.handle_fetch_result(Ok(vec![paper("Other", "http://example.org/other.pdf")]));

    app.handle_key(KeyCode::Char('l'));
    app.handle_key(KeyCode::Enter);
    assert!(app.overlay_open);
    assert_eq!(cursor(&app), 0);
}

#[test]
fn test_esc_closes_the_overlay_before_quitting() {
    let (mut app, _dir) = ready_app(three_papers());

    app.handle_key(KeyCode::Char('l'));
    app.handle_key(KeyCode::Esc);
    assert!(!app.overlay_open);
    assert!(!app.should_quit);

    app.handle_key(KeyCode::Esc);
    assert!(app.should_quit);
}

#[test]
fn test_q_quits() {
    let (mut app, _dir) = ready_app(three_papers());
    app.handle_key(KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn test_overlay_selection_wraps_and_the_wheel_still_drives_the_deck() {
    let (mut app, _dir) = ready_app(three_papers());
    app.handle_key(KeyCode::Char('b'));
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Char('b'));

    app.handle_key(KeyCode::Char('l'));
    app.handle_key(KeyCode::Down);
    assert_eq!(app.overlay_state.selected(), Some(1));
    app.handle_key(KeyCode::Down);
    assert_eq!(app.overlay_state.selected(), Some(0));
    app.handle_key(KeyCode::Up);
    assert_eq!(app.overlay_state.selected(), Some(1));

    app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0));
    assert_eq!(cursor(&app), 2);
    assert!(app.overlay_open);
    assert_eq!(app.overlay_state.selected(), Some(1));
}

#[test]
fn test_removing_a_bookmark_clamps_the_overlay_selection() {
    let (mut app, _dir) = ready_app(three_papers());
    app.handle_key(KeyCode::Char('b'));
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Char('b'));

    app.handle_key(KeyCode::Char('l'));
    app.handle_key(KeyCode::Down);
    assert_eq!(app.overlay_state.selected(), Some(1));

    // The current card is the second bookmark; removing it shrinks the list.
    app.handle_key(KeyCode::Char('b'));
    assert_eq!(app.bookmarks.len(), 1);
    assert_eq!(app.overlay_state.selected(), Some(0));
}

#[test]
fn test_card_text_reflects_bookmark_state_and_missing_links() {
    let theme = Theme::new(false);
    let with_link = paper("Deck A", "http://example.org/a.pdf");

    let marked = text_to_string(&card_text(&with_link, true, &theme));
    assert!(marked.contains("Deck A"));
    assert!(marked.contains("★ bookmarked"));
    assert!(marked.contains("http://example.org/a.pdf"));

    let unmarked = text_to_string(&card_text(&with_link, false, &theme));
    assert!(unmarked.contains("☆ not bookmarked"));

    let linkless = text_to_string(&card_text(&paper("Linkless", ""), false, &theme));
    assert!(linkless.contains("No PDF available"));
}

#[test]
fn test_card_text_formats_the_published_date() {
    let theme = Theme::new(false);
    let text = text_to_string(&card_text(&paper("Deck A", ""), false, &theme));
    assert!(text.contains("Published: 12 Aug 2026"));
}

#[test]
fn test_footer_hints_follow_the_overlay() {
    let theme = Theme::new(false);

    let deck = line_to_string(&footer_hints(false, &theme));
    assert!(deck.contains("b bookmark"));
    assert!(deck.contains("t mode"));
    assert!(deck.contains("q quit"));

    let overlay = line_to_string(&footer_hints(true, &theme));
    assert!(overlay.contains("Enter jump"));
    assert!(overlay.contains("Esc close"));
    assert!(!overlay.contains("q quit"));
}

#[test]
fn test_header_shows_mode_and_bookmark_count() {
    assert!(line_to_string(&header_left(&Theme::new(true))).contains("dark"));
    assert!(line_to_string(&header_left(&Theme::new(false))).contains("light"));
    assert!(line_to_string(&header_right(3, &Theme::new(false))).contains("3 bookmarked"));
}

#[test]
fn test_centered_rect_stays_inside_the_area() {
    let area = Rect::new(0, 0, 100, 50);
    let rect = centered_rect(80, 80, area);

    assert!(rect.x >= area.x && rect.y >= area.y);
    assert!(rect.right() <= area.right() && rect.bottom() <= area.bottom());
    assert!(rect.width < area.width && rect.height < area.height);
    assert!(rect.width > 0 && rect.height > 0);
}

#[test]
fn test_centered_band_height_is_capped_by_the_area() {
    let band = centered_band(Rect::new(0, 0, 10, 9), 3);
    assert_eq!(band, Rect::new(0, 3, 10, 3));

    let thin = centered_band(Rect::new(0, 0, 10, 1), 3);
    assert_eq!(thin, Rect::new(0, 0, 10, 1));
}
