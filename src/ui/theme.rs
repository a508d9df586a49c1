use crate::state::{PresentationSink, ThemeMode};
use ratatui::style::Color;
use std::sync::{Arc, Mutex};

/// Color specification kept as plain channels so palettes stay data.
///
#[derive(Clone, Debug)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: String,
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub text: ColorSpec,
    pub text_muted: ColorSpec,
    pub surface: ColorSpec,
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
    pub warning: ColorSpec,
}

impl Theme {
    /// Return the palette for a presentation mode.
    ///
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        }
    }

    /// Dark palette.
    ///
    pub fn dark() -> Self {
        Theme {
            name: "dark".to_string(),
            primary: ColorSpec {
                r: 122,
                g: 162,
                b: 247,
            },
            accent: ColorSpec {
                r: 187,
                g: 154,
                b: 247,
            },
            text: ColorSpec {
                r: 192,
                g: 202,
                b: 245,
            },
            text_muted: ColorSpec {
                r: 86,
                g: 95,
                b: 137,
            },
            surface: ColorSpec {
                r: 26,
                g: 27,
                b: 38,
            },
            border_active: ColorSpec {
                r: 122,
                g: 162,
                b: 247,
            },
            border_normal: ColorSpec {
                r: 59,
                g: 66,
                b: 97,
            },
            highlight_bg: ColorSpec {
                r: 40,
                g: 52,
                b: 87,
            },
            highlight_fg: ColorSpec {
                r: 255,
                g: 255,
                b: 255,
            },
            warning: ColorSpec {
                r: 224,
                g: 175,
                b: 104,
            },
        }
    }

    /// Light palette.
    ///
    pub fn light() -> Self {
        Theme {
            name: "light".to_string(),
            primary: ColorSpec {
                r: 52,
                g: 84,
                b: 138,
            },
            accent: ColorSpec {
                r: 90,
                g: 74,
                b: 120,
            },
            text: ColorSpec {
                r: 52,
                g: 59,
                b: 88,
            },
            text_muted: ColorSpec {
                r: 111,
                g: 119,
                b: 137,
            },
            surface: ColorSpec {
                r: 230,
                g: 233,
                b: 239,
            },
            border_active: ColorSpec {
                r: 52,
                g: 84,
                b: 138,
            },
            border_normal: ColorSpec {
                r: 160,
                g: 168,
                b: 185,
            },
            highlight_bg: ColorSpec {
                r: 195,
                g: 205,
                b: 227,
            },
            highlight_fg: ColorSpec {
                r: 15,
                g: 20,
                b: 25,
            },
            warning: ColorSpec {
                r: 143,
                g: 94,
                b: 21,
            },
        }
    }
}

/// Presentation-mode side channel. The settings container invokes it; the
/// render loop reads the shared handle every frame, so switching theme and
/// reading the settings value can never disagree.
///
pub struct ThemePresentation {
    handle: Arc<Mutex<Theme>>,
}

impl ThemePresentation {
    pub fn new(handle: Arc<Mutex<Theme>>) -> Self {
        ThemePresentation { handle }
    }
}

impl PresentationSink for ThemePresentation {
    fn apply(&self, mode: ThemeMode) {
        if let Ok(mut theme) = self.handle.lock() {
            *theme = Theme::for_mode(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode_selects_palette() {
        assert_eq!(Theme::for_mode(ThemeMode::Dark).name, "dark");
        assert_eq!(Theme::for_mode(ThemeMode::Light).name, "light");
    }

    #[test]
    fn test_presentation_sink_swaps_the_shared_palette() {
        let handle = Arc::new(Mutex::new(Theme::dark()));
        let sink = ThemePresentation::new(Arc::clone(&handle));
        sink.apply(ThemeMode::Light);
        assert_eq!(handle.lock().unwrap().name, "light");
        sink.apply(ThemeMode::Dark);
        assert_eq!(handle.lock().unwrap().name, "dark");
    }
}
