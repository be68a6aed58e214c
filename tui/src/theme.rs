use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub border_focused: Color,
    pub border_normal: Color,
}

pub const COLOR_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    accent: Color::Rgb(137, 180, 250),       // Blue
    success: Color::Rgb(166, 227, 161),      // Green
    error: Color::Rgb(243, 139, 168),        // Red
    muted: Color::Rgb(108, 112, 134),        // Grey
    selection_bg: Color::Rgb(50, 50, 70),    // Slightly lighter BG for the selected row
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),
};

pub const PLAIN_THEME: Theme = Theme {
    fg: Color::Reset,
    accent: Color::Reset,
    success: Color::Reset,
    error: Color::Reset,
    muted: Color::DarkGray,
    selection_bg: Color::DarkGray,
    border_focused: Color::White,
    border_normal: Color::DarkGray,
};
