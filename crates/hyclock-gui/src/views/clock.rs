//! Clock module view layer - Pure rendering, no business logic
use hyclock_core::modules::clock::ClockDisplay;
use hyclock_proto::config::Appearance;
use iced::{
    Alignment, Element, Length, Padding,
    widget::{column, container, text},
};

use crate::app::Message;

/// Date above time, pinned to the trailing edge of the available width.
pub fn render_clock(display: ClockDisplay, appearance: &Appearance) -> Element<'static, Message> {
    let mut date = text(display.date).size(appearance.date_size);
    let mut time = text(display.time).size(appearance.time_size);

    if let Some(color) = appearance.text_color() {
        date = date.color(color);
        time = time.color(color);
    }

    container(column![date, time].align_x(Alignment::End).spacing(2))
        .width(Length::Fill)
        .align_x(Alignment::End)
        .padding(Padding {
            right: appearance.trailing_margin,
            ..Padding::ZERO
        })
        .into()
}
