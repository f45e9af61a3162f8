use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub selected_bg: Color,
    pub today: Color,
    pub available_day: Color,
    pub unavailable_day: Color,
    pub booking_indicator: Color,
    pub weekday_header: Color,
    pub inactive_day: Color,
    pub free_slot: Color,
    pub booked_slot: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub error: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            cursor_bg: Color::Blue,
            cursor_fg: Color::White,
            selected_bg: Color::Magenta,
            today: Color::Green,
            available_day: Color::White,
            unavailable_day: Color::Gray,
            booking_indicator: Color::Yellow,
            weekday_header: Color::Yellow,
            inactive_day: Color::DarkGray,
            free_slot: Color::Green,
            booked_slot: Color::Red,
            status_bar: Color::White,
            help_title: Color::Cyan,
            error: Color::Red,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(131, 165, 152),
            cursor_bg: Color::Rgb(80, 73, 69),
            cursor_fg: Color::Rgb(235, 219, 178),
            selected_bg: Color::Rgb(177, 98, 134),
            today: Color::Rgb(184, 187, 38),
            available_day: Color::Rgb(235, 219, 178),
            unavailable_day: Color::Rgb(146, 131, 116),
            booking_indicator: Color::Rgb(250, 189, 47),
            weekday_header: Color::Rgb(250, 189, 47),
            inactive_day: Color::Rgb(102, 92, 84),
            free_slot: Color::Rgb(184, 187, 38),
            booked_slot: Color::Rgb(251, 73, 52),
            status_bar: Color::Rgb(235, 219, 178),
            help_title: Color::Rgb(131, 165, 152),
            error: Color::Rgb(251, 73, 52),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            cursor_bg: Color::Rgb(67, 76, 94),
            cursor_fg: Color::Rgb(236, 239, 244),
            selected_bg: Color::Rgb(180, 142, 173),
            today: Color::Rgb(163, 190, 140),
            available_day: Color::Rgb(236, 239, 244),
            unavailable_day: Color::Rgb(129, 161, 193),
            booking_indicator: Color::Rgb(235, 203, 139),
            weekday_header: Color::Rgb(235, 203, 139),
            inactive_day: Color::Rgb(76, 86, 106),
            free_slot: Color::Rgb(163, 190, 140),
            booked_slot: Color::Rgb(191, 97, 106),
            status_bar: Color::Rgb(216, 222, 233),
            help_title: Color::Rgb(136, 192, 208),
            error: Color::Rgb(191, 97, 106),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
