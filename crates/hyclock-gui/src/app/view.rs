use hyclock_core::modules::clock::ACCESSIBILITY_LABEL;
use iced::{Element, Theme};

use super::state::{App, Message};
use crate::views::clock::render_clock;

impl App {
    /// Window title doubles as the accessible name of the clock block.
    pub fn title(&self) -> String {
        ACCESSIBILITY_LABEL.to_owned()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn view(&self) -> Element<'_, Message> {
        render_clock(self.clock.render(), &self.config.appearance)
    }
}
