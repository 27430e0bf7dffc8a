//! Verdict panel
//! Shows the returned text one block per line, in order. The text is not
//! parsed; the rating template is only a hint to the model.

use iced::widget::{column, container, row, text, Column};
use iced::{Alignment, Element, Length};

use crate::state::data::RatingResult;
use crate::Message;

pub fn view(result: &RatingResult) -> Element<'_, Message> {
    let caption = format!(
        "{} · {}",
        result.mode.label(),
        result.rated_at.format("%H:%M:%S")
    );

    let header = row![
        text(result.mode.glyph()).size(36),
        column![text("Claude's Verdict").size(26), text(caption).size(13)].spacing(2),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let blocks = Column::with_children(
        result
            .lines()
            .into_iter()
            .map(|line| text(line).size(16).into()),
    )
    .spacing(10);

    let tip = container(text("💡 Try different modes for different perspectives!").size(14))
        .padding(12)
        .center_x(Length::Fill);

    container(column![header, blocks, tip].spacing(20))
        .padding(24)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}
