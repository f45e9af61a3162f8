use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use bookcal::{
    api::BookingService,
    app::{AppState, LoadStatus},
    calendar::YearMonth,
    input::normal_mode::{self, Action},
    storage::config::Config,
    ui::theme::Theme,
};
use crate::tui::presentation::ui;

pub async fn run_tui(config: Config, start_month: Option<YearMonth>) -> Result<(), io::Error> {
    let service = BookingService::from_config(config.clone())
        .map_err(|e| io::Error::other(e.to_string()))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new()
        .with_theme(theme)
        .with_time_format(config.ui.time_format);

    if let Some(month) = start_month {
        app.go_to_month(month);
    }

    app.status = LoadStatus::Loading;
    terminal.draw(|f| ui(f, &app)).ok();
    app.refresh(&service).await;

    let res = run_app(&mut terminal, &mut app, &service).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    service: &BookingService,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match normal_mode::handle_key(key.code, app) {
                Action::Quit => return Ok(()),
                Action::None => {}
                Action::RefreshMonth => {
                    app.status = LoadStatus::Loading;
                    terminal.draw(|f| ui(f, app))?;
                    app.refresh(service).await;
                }
                Action::LoadDay(request) => {
                    terminal.draw(|f| ui(f, app))?;
                    let result = service
                        .api()
                        .check_day_availability(service.service_id(), request.weekday, request.date)
                        .await;
                    app.apply_day_result(request.date, result);
                }
            }
        }
    }
}
