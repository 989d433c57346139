use iced::widget::{column, container, row, text};
use iced::{Color, Element, Length};

use super::{panel_style, status_color, ACCENT};
use crate::state::data::ToolStatus;
use crate::state::inventory::InventoryStats;
use crate::Message;

fn tile<'a>(label: &'a str, value: usize, color: Color) -> Element<'a, Message> {
    container(
        column![
            text(label.to_uppercase()).size(10).color(Color { a: 0.8, ..color }),
            text(value.to_string()).size(30).color(color),
        ]
        .spacing(4),
    )
    .padding(14)
    .width(Length::Fill)
    .style(panel_style)
    .into()
}

/// Overview row above the tool grid
pub fn overview(stats: InventoryStats) -> Element<'static, Message> {
    row![
        tile("Total Tools", stats.total, Color::WHITE),
        tile("Available", stats.available, status_color(ToolStatus::Available)),
        tile("On Loan", stats.on_loan, status_color(ToolStatus::Loaned)),
        tile("Issues", stats.issues, ACCENT),
    ]
    .spacing(16)
    .into()
}
