use vello::peniko::Color;

/// Shared palette description for themes.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    /// Core accent color used across widgets.
    pub primary: Color,
    /// Lighter variant of the primary color.
    pub primary_light: Color,
    /// Darker variant of the primary color.
    pub primary_dark: Color,
    /// Default background color.
    pub background: Color,
    /// Alternate background used for raised surfaces.
    pub background_alt: Color,
    /// Background of disabled surfaces.
    pub background_disabled: Color,
    /// Main text color.
    pub text: Color,
    /// Muted text color for disabled labels.
    pub text_muted: Color,
    /// Border color for frames and outlines.
    pub border: Color,
}

impl ThemePalette {
    /// Palette used by the light main theme.
    pub fn light() -> Self {
        Self {
            primary: Color::from_rgb8(150, 170, 250),
            primary_light: Color::from_rgb8(170, 170, 250),
            primary_dark: Color::from_rgb8(120, 140, 220),
            background: Color::from_rgb8(255, 255, 255),
            background_alt: Color::from_rgb8(245, 245, 245),
            background_disabled: Color::from_rgb8(230, 230, 230),
            text: Color::from_rgb8(0, 0, 0),
            text_muted: Color::from_rgb8(150, 150, 150),
            border: Color::from_rgb8(200, 200, 200),
        }
    }

    /// Palette for dark themes.
    pub fn dark() -> Self {
        Self {
            primary: Color::from_rgb8(100, 150, 255),
            primary_light: Color::from_rgb8(120, 170, 255),
            primary_dark: Color::from_rgb8(80, 130, 235),
            background: Color::from_rgb8(30, 30, 30),
            background_alt: Color::from_rgb8(40, 40, 40),
            background_disabled: Color::from_rgb8(50, 50, 50),
            text: Color::from_rgb8(220, 220, 220),
            text_muted: Color::from_rgb8(140, 140, 140),
            border: Color::from_rgb8(80, 80, 80),
        }
    }
}
