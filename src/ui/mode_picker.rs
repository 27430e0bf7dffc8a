//! Feedback tone selector
//! Four mutually exclusive buttons, the active one highlighted

use iced::widget::{button, column, text, Row};
use iced::{Alignment, Element, Length, Theme};

use crate::state::mode::Mode;
use crate::Message;

pub fn view(current: Mode) -> Element<'static, Message> {
    let buttons = Mode::ALL.into_iter().map(|mode| {
        let content = column![text(mode.glyph()).size(32), text(mode.label()).size(14)]
            .spacing(6)
            .align_x(Alignment::Center)
            .width(Length::Fill);

        let style: fn(&Theme, button::Status) -> button::Style = if mode == current {
            button::primary
        } else {
            button::secondary
        };

        button(content)
            .on_press(Message::ModeSelected(mode))
            .style(style)
            .padding(12)
            .width(Length::Fill)
            .into()
    });

    Row::with_children(buttons).spacing(12).into()
}
