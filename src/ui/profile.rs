use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Element, Length};

use super::{badge, initials, panel_style, ACCENT, MUTED};
use crate::state::data::User;
use crate::state::inventory::Inventory;
use crate::Message;

/// Content of the profile modal
pub fn profile<'a>(user: &'a User, inventory: &Inventory) -> Element<'a, Message> {
    let borrowed = inventory
        .active_loans()
        .filter(|loan| loan.user_id == user.id)
        .count();

    let content = column![
        row![
            text("PROFILE").size(11).color(MUTED),
            horizontal_space(),
            button(text("Close")).on_press(Message::CloseProfile).style(button::text),
        ],
        row![
            container(text(initials(&user.name)).size(28).color(ACCENT)).padding(16).style(panel_style),
            column![
                text(&user.name).size(22),
                text(&user.email).size(13).color(MUTED),
                badge(user.role.to_string(), ACCENT),
            ]
            .spacing(6),
        ]
        .spacing(16),
        text(format!("Tools currently borrowed: {}", borrowed)).size(14),
    ]
    .spacing(18);

    container(content)
        .padding(24)
        .width(Length::Fixed(420.0))
        .style(panel_style)
        .into()
}
