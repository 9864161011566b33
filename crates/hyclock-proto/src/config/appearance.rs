use hex_color::HexColor;
use iced::Color;
use serde::Deserialize;

/// Sizing and colour settings for the clock block.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// Space kept between the clock and the trailing edge of the window.
    #[serde(default = "default_trailing_margin")]
    pub trailing_margin: f32,
    #[serde(default = "default_date_size")]
    pub date_size:       f32,
    #[serde(default = "default_time_size")]
    pub time_size:       f32,
    #[serde(default)]
    pub text_color:      Option<HexColor>
}

impl Appearance {
    /// Returns the configured text [`Color`], if any.
    #[must_use]
    pub fn text_color(&self) -> Option<Color> {
        self.text_color
            .map(|color| Color::from_rgb8(color.r, color.g, color.b))
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            trailing_margin: default_trailing_margin(),
            date_size:       default_date_size(),
            time_size:       default_time_size(),
            text_color:      None
        }
    }
}

fn default_trailing_margin() -> f32 {
    24.
}

fn default_date_size() -> f32 {
    14.
}

fn default_time_size() -> f32 {
    28.
}
