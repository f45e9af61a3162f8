use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::Datelike;
use bookcal::{app::AppState, ui::month_view::CalendarDayCell};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let grid = app.month_grid();

    let header_style = Style::default().fg(app.theme.weekday_header);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(grid.month.to_string(), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(
            WEEKDAYS
                .iter()
                .map(|day| Span::styled(format!(" {:<6}", day), header_style))
                .collect::<Vec<_>>(),
        ),
    ];

    for week in &grid.weeks {
        let day_spans: Vec<Span> = week
            .days
            .iter()
            .map(|cell| Span::styled(cell_text(cell), cell_style(app, cell)))
            .collect();

        lines.push(Line::from(day_spans));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(app.theme.title)),
        Span::raw(" = Move | "),
        Span::styled("H/L", Style::default().fg(app.theme.title)),
        Span::raw(" = Month | "),
        Span::styled("Enter", Style::default().fg(app.theme.free_slot)),
        Span::raw(" = Slots | "),
        Span::styled("t", Style::default().fg(app.theme.today)),
        Span::raw(" = Today"),
    ]));

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}

fn cell_text(cell: &CalendarDayCell) -> String {
    if cell.bookings.is_empty() {
        format!(" {:>2}    ", cell.date.day())
    } else {
        format!(" {:>2} •{:<2}", cell.date.day(), cell.bookings.len().min(99))
    }
}

fn cell_style(app: &AppState, cell: &CalendarDayCell) -> Style {
    let theme = &app.theme;
    let mut style = Style::default();

    if !cell.is_current_month {
        style = style.fg(theme.inactive_day);
    } else if cell.is_past_date {
        style = style.fg(theme.inactive_day).add_modifier(Modifier::DIM);
    } else if cell.is_available {
        style = style.fg(theme.available_day).add_modifier(Modifier::BOLD);
    } else {
        style = style.fg(theme.unavailable_day);
    }

    if cell.is_today {
        style = style.fg(theme.today).add_modifier(Modifier::BOLD);
    }

    if cell.is_selected {
        style = style.bg(theme.selected_bg);
    }

    if cell.date == app.cursor {
        style = style.bg(theme.cursor_bg).fg(theme.cursor_fg);
    }

    if !cell.bookings.is_empty() && cell.is_current_month {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    style
}
