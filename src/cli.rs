use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use chrono::{Datelike, NaiveDate};

use bookcal::{
    api::{ApiError, BookingService, SessionStore, session::StoredToken},
    app::{AppState, DayDetail, LoadStatus},
    calendar::{DaySlots, TimeFormat, YearMonth, format_time},
    storage::config::Config,
    ui::month_view::MonthGrid,
};

pub const USAGE: &str = "Usage: bookcal [--month YYYY/MM [--tui]] [--day YYYY-MM-DD] [--provider ID] [--service ID] [--token TOKEN]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Interactive { month: Option<YearMonth> },
    MonthText(YearMonth),
    DaySlots(NaiveDate),
    SaveToken(String),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub mode: CliMode,
    pub provider_id: Option<String>,
    pub service_id: Option<String>,
}

impl CliArgs {
    /// Command-line ids win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(provider) = &self.provider_id {
            config.booking.provider_id = provider.clone();
        }
        if let Some(service) = &self.service_id {
            config.booking.service_id = service.clone();
        }
    }
}

pub fn parse_cli_mode() -> Result<CliArgs, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut month = None;
    let mut day = None;
    let mut provider_id = None;
    let mut service_id = None;
    let mut tui = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--month" => {
                let value = args.next().ok_or("--month needs a value (YYYY/MM)")?;
                month = Some(
                    YearMonth::parse(&value)
                        .ok_or_else(|| format!("Invalid month '{}'. Use YYYY/MM.", value))?,
                );
            }
            "--day" => {
                let value = args.next().ok_or("--day needs a value (YYYY-MM-DD)")?;
                day = Some(
                    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", value))?,
                );
            }
            "--tui" => {
                tui = true;
            }
            "--token" => {
                let token = args.next().ok_or("--token needs a value")?;
                return Ok(CliArgs { mode: CliMode::SaveToken(token), provider_id, service_id });
            }
            "--provider" => {
                provider_id = Some(args.next().ok_or("--provider needs an id")?);
            }
            "--service" => {
                service_id = Some(args.next().ok_or("--service needs an id")?);
            }
            "--help" | "-h" => {
                return Ok(CliArgs { mode: CliMode::Help, provider_id, service_id });
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    let mode = match (day, month) {
        (Some(day), _) => CliMode::DaySlots(day),
        (None, Some(month)) if !tui => CliMode::MonthText(month),
        (None, month) => CliMode::Interactive { month },
    };

    Ok(CliArgs { mode, provider_id, service_id })
}

pub async fn run_month_mode(config: Config, month: YearMonth) -> Result<(), io::Error> {
    let service = connect(config)?;
    let mut app = AppState::new();
    app.go_to_month(month);

    app.refresh(&service).await;
    if let LoadStatus::Error(message) = &app.status {
        eprintln!("{}", message);
    }

    display_with_pager(&format_month_text(&app.month_grid()))
}

pub async fn run_day_mode(config: Config, date: NaiveDate) -> Result<(), io::Error> {
    let time_format = config.ui.time_format;
    let service = connect(config)?;
    let mut app = AppState::new();
    app.go_to_month(YearMonth::containing(date));

    if !app.load_day(service.api(), service.service_id(), date).await {
        eprintln!("{} is in the past; only today and later can be booked.", date);
        return Ok(());
    }

    display_with_pager(&format_day_text(&app.day_detail, time_format))
}

pub fn run_token_mode(config: &Config, token: String) -> Result<(), io::Error> {
    let store = SessionStore::new(config.backend.session_file.clone());
    store
        .save_token(&StoredToken::new(token, None))
        .map_err(|e| io::Error::other(e.to_string()))?;

    tracing::info!("Stored session token at {}", config.backend.session_file.display());
    println!("Session saved to {}", config.backend.session_file.display());
    Ok(())
}

fn connect(config: Config) -> Result<BookingService, io::Error> {
    if !config.is_booking_configured() {
        eprintln!("Set booking.provider_id and booking.service_id in:");
        eprintln!("{}", Config::config_path().display());
        eprintln!("or pass --provider and --service.");
    }
    BookingService::from_config(config).map_err(|e: ApiError| io::Error::other(e.to_string()))
}

pub fn format_month_text(grid: &MonthGrid) -> String {
    let mut lines = Vec::new();
    lines.push(grid.month.to_string());
    lines.push(String::new());
    lines.push(" Sun    Mon    Tue    Wed    Thu    Fri    Sat".to_string());

    for week in &grid.weeks {
        let row: Vec<String> = week
            .days
            .iter()
            .map(|cell| {
                if !cell.is_current_month {
                    return "   .   ".to_string();
                }
                let marker = match (cell.is_today, cell.is_available && !cell.is_past_date) {
                    (true, _) => '>',
                    (false, true) => '*',
                    (false, false) => ' ',
                };
                let count = if cell.bookings.is_empty() {
                    "  ".to_string()
                } else {
                    format!("{:<2}", cell.bookings.len().min(99))
                };
                format!("{}{:>2} {} ", marker, cell.date.day(), count)
            })
            .collect();
        lines.push(row.join("").trim_end().to_string());
    }

    lines.push(String::new());
    lines.push("* bookable day   > today   number = bookings".to_string());
    lines.join("\n")
}

pub fn format_day_text(detail: &DayDetail, time_format: TimeFormat) -> String {
    let mut lines = Vec::new();

    match detail {
        DayDetail::Idle => lines.push("No day selected.".to_string()),
        DayDetail::Loading(date) => lines.push(format!("Loading {}...", date)),
        DayDetail::Failed { date, message } => {
            lines.push(format!("Slots - {}", date.format("%A, %B %d, %Y")));
            lines.push(String::new());
            lines.push(message.clone());
        }
        DayDetail::Loaded { date, slots } => {
            lines.push(format!("Slots - {}", date.format("%A, %B %d, %Y")));
            lines.push(String::new());

            match slots {
                DaySlots::NoAvailability => lines.push("No availability this day.".to_string()),
                DaySlots::Slots(list) if list.is_empty() => {
                    lines.push("No bookable slots in this window.".to_string())
                }
                DaySlots::Slots(list) => {
                    for slot in list {
                        let state = if slot.is_booked { "booked" } else { "free" };
                        lines.push(format!("- {:>8}  {}", format_time(slot.time, time_format), state));
                    }
                    lines.push(String::new());
                    lines.push(format!("{} free, {} booked", slots.free_count(), slots.booked_count()));
                }
            }
        }
    }

    lines.join("\n")
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookcal::{
        calendar::{BookingsByDate, ServiceSchedule, TimeSlot},
        ui::month_view::build_month_grid,
    };
    use chrono::NaiveTime;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn no_arguments_starts_interactive() {
        let parsed = parse_args(args(&[])).unwrap();
        assert_eq!(parsed.mode, CliMode::Interactive { month: None });
    }

    #[test]
    fn month_alone_prints_text() {
        let parsed = parse_args(args(&["--month", "2024/02", "--service", "svc-1"])).unwrap();

        assert_eq!(parsed.mode, CliMode::MonthText(YearMonth::new(2024, 2).unwrap()));
        assert_eq!(parsed.service_id.as_deref(), Some("svc-1"));
    }

    #[test]
    fn month_with_tui_flag_opens_interactive_on_that_month() {
        let parsed = parse_args(args(&["--tui", "--month", "2024/02"])).unwrap();
        assert_eq!(parsed.mode, CliMode::Interactive { month: YearMonth::new(2024, 2) });
    }

    #[test]
    fn token_argument_saves_session() {
        let parsed = parse_args(args(&["--token", "abc"])).unwrap();
        assert_eq!(parsed.mode, CliMode::SaveToken("abc".to_string()));
    }

    #[test]
    fn day_argument_prints_slots() {
        let parsed = parse_args(args(&["--day", "2024-02-29"])).unwrap();
        assert_eq!(parsed.mode, CliMode::DaySlots(date(2024, 2, 29)));
    }

    #[test]
    fn invalid_day_is_rejected() {
        assert!(parse_args(args(&["--day", "2023-02-29"])).is_err());
    }

    #[test]
    fn unknown_argument_is_rejected() {
        assert!(parse_args(args(&["--sample"])).is_err());
    }

    #[test]
    fn missing_value_is_rejected() {
        assert!(parse_args(args(&["--provider"])).is_err());
    }

    #[test]
    fn overrides_replace_configured_ids() {
        let parsed = parse_args(args(&["--provider", "p-2"])).unwrap();
        let mut config = Config::default();
        config.booking.service_id = "svc-1".to_string();

        parsed.apply_overrides(&mut config);

        assert_eq!(config.booking.provider_id, "p-2");
        assert_eq!(config.booking.service_id, "svc-1");
    }

    #[test]
    fn month_text_lists_every_week() {
        let grid = build_month_grid(
            YearMonth::new(2024, 2).unwrap(),
            date(2024, 2, 10),
            &BookingsByDate::new(),
            &ServiceSchedule::disabled(),
            None,
        );

        let text = format_month_text(&grid);

        assert!(text.starts_with("February 2024"));
        assert!(text.contains(">10"));
        assert!(text.contains("29"));
    }

    #[test]
    fn day_text_shows_booked_and_free_slots() {
        let detail = DayDetail::Loaded {
            date: date(2024, 2, 29),
            slots: DaySlots::Slots(vec![
                TimeSlot { time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(), is_booked: false },
                TimeSlot { time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(), is_booked: true },
            ]),
        };

        let text = format_day_text(&detail, TimeFormat::TwentyFourHour);

        assert!(text.contains("09:00  free"));
        assert!(text.contains("09:30  booked"));
        assert!(text.contains("1 free, 1 booked"));
    }

    #[test]
    fn day_text_heading_is_plain_ascii() {
        let detail = DayDetail::Failed { date: date(2024, 2, 29), message: "Not found".to_string() };

        let text = format_day_text(&detail, TimeFormat::TwentyFourHour);

        assert!(text.starts_with("Slots - Thursday, February 29, 2024"));
        assert!(text.is_ascii());
    }

    #[test]
    fn token_mode_writes_session_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.backend.session_file = temp_dir.path().join("session.json");

        run_token_mode(&config, "abc".to_string()).unwrap();

        let session = SessionStore::new(config.backend.session_file.clone()).load_session();
        assert_eq!(session.access_token(), Some("abc"));
    }

    #[test]
    fn day_text_reports_no_availability() {
        let detail = DayDetail::Loaded { date: date(2024, 3, 3), slots: DaySlots::NoAvailability };

        assert!(format_day_text(&detail, TimeFormat::TwelveHour).contains("No availability this day."));
    }
}
