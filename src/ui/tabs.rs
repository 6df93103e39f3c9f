// Tab bar rendering with per-category counts.
// Highlights the active category tab.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::portfolio::Category;

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tab_titles: Vec<Line> = Category::ALL
        .iter()
        .map(|category| {
            let title = format!("{} ({})", category.title(), app.controller.count(*category));

            let style = if *category == app.active_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(Span::styled(title, style))
        })
        .collect();

    let title = match app.controller.username() {
        Some(username) => format!(" folio · {} ", username),
        None => " folio ".to_string(),
    };

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(app.active_tab.index())
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
