use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};

use super::{panel_style, thumbnail, ACCENT, MUTED};
use crate::state::inventory::Inventory;
use crate::Message;

/// Active loans with a Return action each
pub fn active_loans(inventory: &Inventory) -> Element<'_, Message> {
    let rows: Vec<Element<'_, Message>> = inventory
        .active_loans()
        .map(|loan| {
            let tool = inventory.get(&loan.tool_id);
            let tool_name = tool
                .map(|tool| tool.name.to_uppercase())
                .unwrap_or_else(|| format!("UNKNOWN TOOL ({})", loan.tool_id));

            let details = column![
                text(tool_name).size(16),
                row![
                    text("USER:").size(12).color(ACCENT),
                    text(&loan.user_name).size(12),
                ]
                .spacing(6),
                text(format!(
                    "Since {}",
                    loan.checkout_date.format("%d %b %Y %H:%M")
                ))
                .size(11)
                .color(MUTED),
            ]
            .spacing(4);

            container(
                row![
                    tool.map(|tool| thumbnail(tool, 44.0))
                        .unwrap_or_else(|| horizontal_space().width(Length::Fixed(44.0)).into()),
                    details,
                    horizontal_space(),
                    button(text("Return").size(12))
                        .on_press(Message::ReturnLoan(loan.id.clone()))
                        .style(button::secondary),
                ]
                .spacing(14)
                .align_y(Alignment::Center),
            )
            .padding(14)
            .width(Length::Fill)
            .style(panel_style)
            .into()
        })
        .collect();

    if rows.is_empty() {
        return text("No tools are out on loan.").color(MUTED).into();
    }

    column(rows).spacing(12).into()
}
