use ratatui::style::Color;
use readtrack_core::{ReadingStatus, ToastKind};

/// Nord palette.
pub struct NordTheme {
    // Polar Night
    pub nord0: Color, // #2E3440 background
    pub nord1: Color, // #3B4252 selected row, bars
    pub nord2: Color, // #4C566A borders
    pub nord3: Color, // #616E88 muted text

    // Snow Storm
    pub nord4: Color, // #D8DEE9 text
    pub nord5: Color, // #E5E9F0 headings
    pub nord6: Color, // #ECEFF4

    // Frost
    pub nord7: Color,  // #8FBCBB
    pub nord8: Color,  // #88C0D0 focus
    pub nord9: Color,  // #81A1C1
    pub nord10: Color, // #5E81AC

    // Aurora
    pub nord11: Color, // #BF616A errors, delete
    pub nord12: Color, // #D08770 want to read
    pub nord13: Color, // #EBCB8B stars
    pub nord14: Color, // #A3BE8C success, completed
    pub nord15: Color, // #B48EAD custom books
}

impl Default for NordTheme {
    fn default() -> Self {
        Self {
            nord0: Color::Rgb(46, 52, 64),
            nord1: Color::Rgb(59, 66, 82),
            nord2: Color::Rgb(76, 86, 106),
            nord3: Color::Rgb(97, 110, 136),
            nord4: Color::Rgb(216, 222, 233),
            nord5: Color::Rgb(229, 233, 240),
            nord6: Color::Rgb(236, 239, 244),
            nord7: Color::Rgb(143, 188, 187),
            nord8: Color::Rgb(136, 192, 208),
            nord9: Color::Rgb(129, 161, 193),
            nord10: Color::Rgb(94, 129, 172),
            nord11: Color::Rgb(191, 97, 106),
            nord12: Color::Rgb(208, 135, 112),
            nord13: Color::Rgb(235, 203, 139),
            nord14: Color::Rgb(163, 190, 140),
            nord15: Color::Rgb(180, 142, 173),
        }
    }
}

impl NordTheme {
    // Semantic aliases
    pub fn bg(&self) -> Color {
        self.nord0
    }
    pub fn bg_secondary(&self) -> Color {
        self.nord1
    }
    pub fn border(&self) -> Color {
        self.nord2
    }
    pub fn muted(&self) -> Color {
        self.nord3
    }

    pub fn fg(&self) -> Color {
        self.nord4
    }
    pub fn fg_bright(&self) -> Color {
        self.nord5
    }
    pub fn fg_white(&self) -> Color {
        self.nord6
    }

    pub fn frost_mint(&self) -> Color {
        self.nord7
    }
    pub fn frost_ice(&self) -> Color {
        self.nord8
    }
    pub fn frost_blue(&self) -> Color {
        self.nord9
    }
    pub fn frost_dark(&self) -> Color {
        self.nord10
    }

    pub fn red(&self) -> Color {
        self.nord11
    }
    pub fn orange(&self) -> Color {
        self.nord12
    }
    pub fn yellow(&self) -> Color {
        self.nord13
    }
    pub fn green(&self) -> Color {
        self.nord14
    }
    pub fn purple(&self) -> Color {
        self.nord15
    }

    // Logic aliases
    pub fn active_panel(&self) -> Color {
        self.frost_ice()
    }
    pub fn danger(&self) -> Color {
        self.red()
    }
    pub fn success(&self) -> Color {
        self.green()
    }
    pub fn star_color(&self) -> Color {
        self.yellow()
    }
    pub fn custom_color(&self) -> Color {
        self.purple()
    }

    pub fn status_color(&self, status: ReadingStatus) -> Color {
        match status {
            ReadingStatus::WantToRead => self.orange(),
            ReadingStatus::Reading => self.frost_ice(),
            ReadingStatus::Completed => self.green(),
        }
    }

    pub fn toast_color(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Info => self.frost_blue(),
            ToastKind::Success => self.success(),
            ToastKind::Error => self.danger(),
        }
    }
}
