// Card list rendering for one category.
// Provides styled card views with loading, empty and error states.

use ratatui::{prelude::*, widgets::*};

use crate::portfolio::{Card, CardSlot};

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

/// Placeholder rows drawn while the repository list is in flight.
pub fn render_skeletons(frame: &mut Frame, slots: &[CardSlot], area: Rect) {
    let shade = Style::default().fg(Color::DarkGray);
    let items: Vec<ListItem> = slots
        .iter()
        .map(|_| {
            ListItem::new(vec![
                Line::from(Span::styled("░".repeat(24), shade)),
                Line::from(Span::styled("░".repeat(40), shade)),
                Line::from(""),
            ])
        })
        .collect();

    frame.render_widget(List::new(items), area);
}

/// Multi-line list item for one card.
fn card_item(card: &Card) -> ListItem<'_> {
    let dim = Style::default().fg(Color::DarkGray);
    let language = format!("[{}]", card.language);
    let stars = format!("★ {}", card.stars);

    let mut meta = vec![
        Span::styled(language, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(stars, Style::default().fg(Color::Yellow)),
    ];
    if card.fork {
        meta.push(Span::raw(" "));
        meta.push(Span::styled("fork", Style::default().fg(Color::Magenta)));
    }
    meta.push(Span::styled(format!("  updated {}", card.updated), dim));

    let title_style = Style::default().add_modifier(Modifier::BOLD);
    ListItem::new(vec![
        Line::from(Span::styled(card.title.as_str(), title_style)),
        Line::from(meta),
        Line::from(Span::raw(card.description.as_str())),
        Line::from(vec![
            Span::styled("🖼  ", dim),
            Span::styled(card.thumbnail.as_str(), dim),
        ]),
        Line::from(""),
    ])
}

/// Render the visible cards of a category with selection.
pub fn render_cards<'a>(
    frame: &mut Frame,
    cards: impl Iterator<Item = &'a Card>,
    state: &mut ListState,
    area: Rect,
) {
    let items: Vec<ListItem> = cards.map(card_item).collect();

    let list_widget = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, state);
}

/// Link shown in the footer for the selected card.
pub fn selected_link<'a>(
    mut cards: impl Iterator<Item = &'a Card>,
    state: &ListState,
) -> Option<&'a str> {
    state
        .selected()
        .and_then(|i| cards.nth(i))
        .map(|card| card.html_url.as_str())
}
