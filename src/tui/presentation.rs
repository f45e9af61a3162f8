use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use bookcal::app::{AppState, LoadStatus};
use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65),
            Constraint::Percentage(35),
        ])
        .split(main_chunks[1]);

    let title = Paragraph::new(format!("bookcal - {}", app.current_month))
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    calendar_views::month::render(f, app, content_chunks[0]);
    calendar_views::slot_list::render(f, app, content_chunks[1]);

    let (status_text, status_color) = match &app.status {
        LoadStatus::Ready => (
            format!(
                "Bookings this view: {} | Press 'q' to quit, '?' for help",
                app.month_bookings.total()
            ),
            app.theme.status_bar,
        ),
        LoadStatus::Loading => ("Loading bookings...".to_string(), app.theme.status_bar),
        LoadStatus::Error(message) => (message.clone(), app.theme.error),
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }
}
