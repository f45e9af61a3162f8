use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use bookcal::{
    app::{AppState, DayDetail},
    calendar::{DaySlots, format_time},
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let title = match &app.day_detail {
        DayDetail::Idle => " Time Slots ".to_string(),
        DayDetail::Loading(date)
        | DayDetail::Loaded { date, .. }
        | DayDetail::Failed { date, .. } => format!(" {} ", date.format("%A, %B %d")),
    };

    let lines = match &app.day_detail {
        DayDetail::Idle => vec![
            Line::from(""),
            Line::from("  Select a day and press Enter"),
            Line::from("  to see its time slots."),
        ],
        DayDetail::Loading(_) => vec![Line::from(""), Line::from("  Loading...")],
        DayDetail::Failed { message, .. } => vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {}", message), Style::default().fg(app.theme.error))),
            Line::from(""),
            Line::from("  Press Enter to try again."),
        ],
        DayDetail::Loaded { slots, .. } => slot_lines(app, slots),
    };

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, area);
}

fn slot_lines<'a>(app: &AppState, slots: &DaySlots) -> Vec<Line<'a>> {
    let DaySlots::Slots(list) = slots else {
        return vec![Line::from(""), Line::from("  No availability this day.")];
    };

    if list.is_empty() {
        return vec![Line::from(""), Line::from("  No bookable slots in this window.")];
    }

    let mut lines = vec![
        Line::from(format!(
            "  {} free, {} booked",
            slots.free_count(),
            slots.booked_count()
        )),
        Line::from(""),
    ];

    for slot in list {
        let time = format_time(slot.time, app.time_format);
        let line = if slot.is_booked {
            Line::from(vec![
                Span::styled(
                    format!("  {:>8}", time),
                    Style::default().fg(app.theme.booked_slot).add_modifier(Modifier::CROSSED_OUT),
                ),
                Span::styled("  booked", Style::default().fg(app.theme.booked_slot)),
            ])
        } else {
            Line::from(vec![
                Span::styled(format!("  {:>8}", time), Style::default().fg(app.theme.free_slot)),
                Span::raw("  free"),
            ])
        };
        lines.push(line);
    }

    lines
}
