// UI module for rendering the TUI.
// Contains widgets for category tabs, card lists, the board panel and modals.

mod cards;
mod modal;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, InputMode};
use crate::portfolio::{BoardEmbed, Category};
use crate::state::{LoadPhase, StatusMessage};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Search line
            Constraint::Length(1), // Status message
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    draw_content(frame, app, chunks[1]);
    draw_search_line(frame, app, chunks[2]);
    draw_status_message(frame, app.controller.status(), chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    match &app.input {
        InputMode::Username(buffer) => modal::draw_input_modal(
            frame,
            "GitHub Username",
            "Username",
            buffer,
            "Public repositories load after saving",
        ),
        InputMode::BoardUrl(buffer) => modal::draw_input_modal(
            frame,
            "Pinterest Board",
            "Board URL",
            buffer,
            "e.g. https://www.pinterest.com/user/board/",
        ),
        InputMode::Normal | InputMode::Search => {}
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the active category, with the board panel above graphics.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let area = if app.active_tab == Category::Graphics {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(1)])
            .split(area);
        draw_board_panel(frame, app.board.embed(), app.board.message(), chunks[0]);
        chunks[1]
    } else {
        area
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.active_tab.title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let category = app.active_tab;
    let status_text = app
        .controller
        .status()
        .map(|s| s.text.as_str())
        .unwrap_or_default();

    match app.controller.phase() {
        LoadPhase::Idle => cards::render_empty(frame, inner, "Press u to enter a GitHub username"),
        LoadPhase::Loading => {
            let slots = app.controller.container(category);
            if slots.is_empty() {
                cards::render_loading(frame, inner, status_text);
            } else {
                cards::render_skeletons(frame, slots, inner);
            }
        }
        LoadPhase::Failed => cards::render_error(frame, inner, status_text),
        LoadPhase::Empty => cards::render_empty(frame, inner, status_text),
        LoadPhase::Rendered => {
            if app.controller.count(category) == 0 {
                let query = app.controller.search_query().trim();
                let message = if query.is_empty() {
                    "No projects in this category".to_string()
                } else {
                    format!("No matches for \"{}\"", query)
                };
                cards::render_empty(frame, inner, &message);
            } else {
                let state = &mut app.list_states[category.index()];
                cards::render_cards(frame, app.controller.visible_cards(category), state, inner);
            }
        }
    }
}

const NO_BOARD_HINT: &str = "No board set. Press p to add one.";

/// Draw the Pinterest board embed settings and its last message.
fn draw_board_panel(
    frame: &mut Frame,
    embed: Option<&BoardEmbed>,
    message: Option<&StatusMessage>,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Pinterest Board ");

    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = match embed {
        Some(embed) => {
            let sizing = format!(
                "width {}  scale height {}  scale width {}",
                embed.board_width, embed.scale_height, embed.scale_width
            );
            vec![
                Line::from(vec![
                    Span::styled("🔗 ", dim),
                    Span::styled(embed.url.as_str(), Style::default().fg(Color::Cyan)),
                ]),
                Line::from(Span::styled(sizing, dim)),
            ]
        }
        None => vec![Line::from(Span::styled(NO_BOARD_HINT, dim))],
    };

    if let Some(message) = message {
        let text = Span::styled(message.text.as_str(), message_style(message));
        lines.push(Line::from(text));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw the live search query, if any.
fn draw_search_line(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input == InputMode::Search;
    let query = app.controller.search_query();
    if !editing && query.is_empty() {
        return;
    }

    let mut spans = vec![
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(query),
    ];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    let search_style = Style::default().bg(Color::DarkGray);
    let search_widget = Paragraph::new(Line::from(spans)).style(search_style);
    frame.render_widget(search_widget, area);
}

fn message_style(message: &StatusMessage) -> Style {
    if message.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn draw_status_message(frame: &mut Frame, status: Option<&StatusMessage>, area: Rect) {
    if let Some(status) = status {
        let text = format!(" {}", status.text);
        let line = Paragraph::new(Span::styled(text, message_style(status)));
        frame.render_widget(line, area);
    }
}

/// Draw the status bar with keybinding hints and rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
        Span::raw("  Tab "),
        Span::styled("Category", Style::default().fg(Color::DarkGray)),
        Span::raw("  / "),
        Span::styled("Search", Style::default().fg(Color::DarkGray)),
        Span::raw("  u "),
        Span::styled("User", Style::default().fg(Color::DarkGray)),
        Span::raw("  p "),
        Span::styled("Board", Style::default().fg(Color::DarkGray)),
        Span::raw("  r "),
        Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    let category = app.active_tab;
    if let Some(link) = cards::selected_link(
        app.controller.visible_cards(category),
        &app.list_states[category.index()],
    ) {
        hints.push(Span::styled(
            format!("  {}", link),
            Style::default().fg(Color::Blue),
        ));
    }

    // Rate limit is only known after the first response
    let rate = app.rate_limit();
    if rate.limit > 0 {
        let rate_color = if rate.remaining < 10 {
            Color::Red
        } else if rate.remaining < 30 {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        hints.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 55.min(area.width);
    let popup_height = 18.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("  ↑/↓ or j/k    ", "Select project"),
        key("  Tab / ←→ h/l  ", "Switch category"),
        key("  /             ", "Search projects (Esc clears)"),
        key("  u             ", "Set GitHub username"),
        key("  U             ", "Clear GitHub username"),
        key("  p             ", "Set Pinterest board"),
        key("  P             ", "Clear Pinterest board"),
        key("  r             ", "Reload repositories"),
        key("  ?             ", "Show/hide this help"),
        key("  q             ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::cache::{MemoryStore, shared};
    use crate::config::Settings;
    use crate::github::{GitHubClient, test_repo};
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn app() -> App {
        let settings = Settings {
            username: None,
            api_url: "http://127.0.0.1:9".to_string(),
            token: None,
            data_dir: PathBuf::from("/tmp/folio-test"),
            page_protocol: "https:".to_string(),
            read_cache: true,
        };
        let client = GitHubClient::new(&settings.api_url, None).unwrap();
        App::new(&settings, shared(MemoryStore::new()), client)
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_draw_idle_prompt() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Press u to enter a GitHub username"));
        assert!(text.contains("Web (0)"));
    }

    #[tokio::test]
    async fn test_draw_rendered_cards() {
        let mut app = app();
        let generation = app.controller.begin_load("alice");
        app.handle_app_event(AppEvent::ReposLoaded {
            generation,
            result: Ok(vec![test_repo("landing-site")]),
        });

        let text = screen(&mut app);
        assert!(text.contains("landing-site"));
        assert!(text.contains("Web (1)"));
        assert!(text.contains("Loaded 1 public repos for alice."));
    }

    #[tokio::test]
    async fn test_draw_graphics_board_panel() {
        let mut app = app();
        app.active_tab = Category::Graphics;
        let text = screen(&mut app);
        assert!(text.contains("No board set"));
    }
}
