use iced::widget::{button, column, container, horizontal_space, image, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use super::{badge, condition_color, panel_style, ACCENT, MUTED};
use crate::state::data::{AnalysisResult, Tool};
use crate::state::scan::{ScanPhase, ScanSession};
use crate::Message;

fn review(result: &AnalysisResult, target: Option<&Tool>) -> Element<'static, Message> {
    let mut heading = column![
        text(result.tool_name.clone()).size(20),
        text(format!("Confidence: {}%", result.confidence_score))
            .size(12)
            .color(MUTED),
    ]
    .spacing(2);
    if result.is_fallback() {
        heading = heading.push(
            text("The analysis service could not be reached or gave no usable answer.")
                .size(12)
                .color(ACCENT),
        );
    }

    // Applying needs a target tool and a real assessment
    let apply = target
        .filter(|_| !result.is_fallback())
        .map(|tool| Message::ApplyCondition(tool.id.clone(), result.condition));
    let apply_label = match target {
        Some(tool) => format!("Update Condition of {}", tool.name),
        None => "Update Condition".to_string(),
    };

    column![
        row![
            heading,
            horizontal_space(),
            badge(result.condition.to_string(), condition_color(result.condition)),
        ]
        .align_y(Alignment::Start),
        text(format!("Analysis: {}", result.description)).size(14),
        text(format!("Recommendation: {}", result.maintenance_suggestion)).size(14),
        row![
            button(text(apply_label).size(13))
                .width(Length::Fill)
                .style(button::primary)
                .on_press_maybe(apply),
            button(text("Scan Again").size(13))
                .style(button::secondary)
                .on_press(Message::RetryScan),
            button(text("New Photo").size(13))
                .style(button::secondary)
                .on_press(Message::DismissReview),
        ]
        .spacing(8),
    ]
    .spacing(12)
    .into()
}

/// Content of the scanner modal
///
/// `preview` is the decoded handle of the session image, kept by the
/// caller so it isn't rebuilt on every frame.
pub fn scanner<'a>(
    session: &'a ScanSession,
    preview: Option<&image::Handle>,
    target: Option<&'a Tool>,
) -> Element<'a, Message> {
    let title = match target {
        Some(tool) => format!("AI Tool Inspector · {}", tool.name),
        None => "AI Tool Inspector".to_string(),
    };

    let header = row![
        text(title).size(20),
        horizontal_space(),
        button(text("Close")).on_press(Message::CloseScanner).style(button::text),
    ]
    .align_y(Alignment::Center);

    let picture: Element<'a, Message> = match (session.image(), preview) {
        (Some(photo), Some(handle)) => column![
            image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(260.0))
                .content_fit(ContentFit::Cover),
            text(photo.name.clone()).size(11).color(MUTED),
        ]
        .spacing(4)
        .into(),
        _ => container(
            button(text("Take Photo or Upload").size(14))
                .padding(16)
                .style(button::secondary)
                .on_press(Message::PickImage),
        )
        .width(Length::Fill)
        .height(Length::Fixed(200.0))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(200.0))
        .into(),
    };

    let footer: Element<'a, Message> = match session.phase() {
        ScanPhase::Idle => text("Pick a clear photo of a single tool.")
            .size(12)
            .color(MUTED)
            .into(),
        ScanPhase::Previewing => row![
            button(text("Analyze Condition").size(14))
                .width(Length::Fill)
                .style(button::primary)
                .on_press(Message::Analyze),
            button(text("Change Photo").size(14))
                .style(button::secondary)
                .on_press(Message::PickImage),
        ]
        .spacing(8)
        .into(),
        ScanPhase::Analyzing => text("Analyzing Condition...").size(16).color(ACCENT).into(),
        ScanPhase::Reviewing => match session.result() {
            Some(result) => review(result, target),
            None => text("").into(),
        },
    };

    container(column![header, picture, footer].spacing(18))
        .padding(24)
        .width(Length::Fixed(480.0))
        .style(panel_style)
        .into()
}
