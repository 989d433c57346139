use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use super::{badge, condition_color, panel_style, status_color, thumbnail, ACCENT, MUTED};
use crate::state::data::{Loan, LoanStatus, Tool, ToolStatus};
use crate::Message;

/// Label of the borrow button for each status
fn borrow_label(status: ToolStatus) -> &'static str {
    match status {
        ToolStatus::Available => "PINJAM ALAT INI",
        ToolStatus::Loaned => "SEDANG DIPINJAM",
        ToolStatus::Maintenance => "SEDANG PERBAIKAN",
        ToolStatus::Damaged => "ALAT RUSAK",
    }
}

fn field<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(label).size(12).color(MUTED).width(Length::Fixed(140.0)),
        text(value).size(14),
    ]
    .into()
}

fn history_row(loan: &Loan) -> Element<'_, Message> {
    let state = match loan.status() {
        LoanStatus::Active => "Active".to_string(),
        LoanStatus::Returned => "Returned".to_string(),
    };

    row![
        text(&loan.user_name).size(13),
        horizontal_space(),
        text(loan.checkout_date.format("%d %b %Y").to_string())
            .size(12)
            .color(MUTED),
        text(state).size(12).color(ACCENT).width(Length::Fixed(80.0)),
    ]
    .spacing(12)
    .into()
}

/// Content of the tool detail modal
pub fn tool_detail<'a>(tool: &'a Tool, history: Vec<&'a Loan>) -> Element<'a, Message> {
    let title = column![
        text(tool.category.to_uppercase()).size(11).color(ACCENT),
        text(&tool.name).size(26),
        row![
            badge(tool.status.to_string(), status_color(tool.status)),
            badge(tool.condition.to_string(), condition_color(tool.condition)),
        ]
        .spacing(8),
    ]
    .spacing(6);

    let mut info = column![
        field("Brand", tool.brand.clone()),
        field("Location", tool.location.clone()),
        field("Purchased", tool.purchase_date.format("%d %b %Y").to_string()),
        field(
            "Last maintenance",
            tool.last_maintenance_date.format("%d %b %Y").to_string()
        ),
    ]
    .spacing(8);
    if let Some(description) = &tool.description {
        info = info.push(field("Notes", description.clone()));
    }

    let history: Element<'a, Message> = if history.is_empty() {
        text("No loan history yet.").size(12).color(MUTED).into()
    } else {
        Column::with_children(history.into_iter().map(history_row))
            .spacing(8)
            .into()
    };

    let borrow = button(text(borrow_label(tool.status)).size(14))
        .padding(12)
        .width(Length::Fill)
        .style(button::primary)
        .on_press_maybe(
            (tool.status == ToolStatus::Available).then(|| Message::Borrow(tool.id.clone())),
        );

    let actions = row![
        borrow,
        button(text("Report Issue").size(14))
            .padding(12)
            .style(button::danger)
            .on_press(Message::ReportIssue(tool.id.clone())),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let content = column![
        row![
            thumbnail(tool, 96.0),
            title,
            horizontal_space(),
            button(text("Close")).on_press(Message::CloseDetail).style(button::text),
        ]
        .spacing(16),
        info,
        text("LOAN HISTORY").size(11).color(MUTED),
        history,
        actions,
    ]
    .spacing(18);

    container(scrollable(content))
        .padding(24)
        .max_width(640.0)
        .style(panel_style)
        .into()
}
