use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use super::{badge, condition_color, panel_style, status_color, thumbnail, ACCENT, MUTED};
use crate::state::data::Tool;
use crate::Message;

const CARD_WIDTH: f32 = 260.0;

/// One tool in the inventory grid
pub fn tool_card(tool: &Tool) -> Element<'_, Message> {
    let header = row![
        badge(tool.status.to_string(), status_color(tool.status)),
        horizontal_space(),
        badge(tool.condition.to_string(), condition_color(tool.condition)),
    ]
    .align_y(Alignment::Center);

    let body = row![
        thumbnail(tool, 56.0),
        column![
            text(tool.category.to_uppercase()).size(10).color(ACCENT),
            text(&tool.name).size(18),
            text(format!("{} · {}", tool.brand, tool.location))
                .size(12)
                .color(MUTED),
        ]
        .spacing(4),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let actions = row![
        button(text("Detail").size(13))
            .on_press(Message::OpenDetail(tool.id.clone()))
            .style(button::secondary)
            .width(Length::Fill),
        button(text("Scan").size(13))
            .on_press(Message::OpenScanner(Some(tool.id.clone())))
            .style(button::primary),
    ]
    .spacing(8);

    container(column![header, body, actions].spacing(12))
        .padding(14)
        .width(Length::Fixed(CARD_WIDTH))
        .style(panel_style)
        .into()
}

/// Cards laid out left to right, wrapping to the window width
pub fn tool_grid(tools: &[Tool]) -> Element<'_, Message> {
    let cards: Vec<Element<'_, Message>> = tools.iter().map(tool_card).collect();

    Wrap::with_elements(cards)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}
