/// View pieces for the main window
///
/// Each submodule renders one part of the screen from borrowed state and
/// emits `crate::Message`s; none of them hold state of their own.

pub mod detail;
pub mod loans;
pub mod profile;
pub mod scanner;
pub mod stats;
pub mod tool_card;

use iced::widget::{center, container, mouse_area, opaque, stack, text};
use iced::{Border, Color, Element, Length};

use crate::state::data::{Tool, ToolCondition, ToolStatus};

/// Workshop orange used for accents
pub const ACCENT: Color = Color {
    r: 0.918,
    g: 0.345,
    b: 0.047,
    a: 1.0,
};
pub const MUTED: Color = Color {
    r: 0.47,
    g: 0.51,
    b: 0.58,
    a: 1.0,
};
pub const PANEL: Color = Color {
    r: 0.118,
    g: 0.137,
    b: 0.18,
    a: 1.0,
};

pub fn status_color(status: ToolStatus) -> Color {
    match status {
        ToolStatus::Available => Color::from_rgb(0.063, 0.725, 0.506),
        ToolStatus::Loaned => Color::from_rgb(0.231, 0.51, 0.965),
        ToolStatus::Maintenance => ACCENT,
        ToolStatus::Damaged => Color::from_rgb(0.937, 0.267, 0.267),
    }
}

pub fn condition_color(condition: ToolCondition) -> Color {
    match condition {
        ToolCondition::Good => Color::from_rgb(0.29, 0.871, 0.502),
        ToolCondition::Fair => Color::from_rgb(0.98, 0.8, 0.082),
        ToolCondition::Poor => Color::from_rgb(0.973, 0.443, 0.443),
    }
}

/// Small rounded label with a tinted background
pub fn badge<'a, Message: 'a>(label: String, color: Color) -> Element<'a, Message> {
    container(text(label).size(12).color(color))
        .padding([2, 8])
        .style(move |_theme| container::Style {
            background: Some(Color { a: 0.2, ..color }.into()),
            border: Border {
                color: Color { a: 0.5, ..color },
                width: 1.0,
                radius: 10.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

/// Up to two capitals taken from the first words of a name
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Square stand-in for the tool photo.
///
/// `image_url` points at a remote host and is not fetched; the tile shows
/// the initials of the tool name tinted by its status instead.
pub fn thumbnail<'a, Message: 'a>(tool: &Tool, size: f32) -> Element<'a, Message> {
    let tint = status_color(tool.status);

    center(text(initials(&tool.name)).size(size * 0.35).color(tint))
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .style(move |_theme| container::Style {
            background: Some(Color { a: 0.12, ..tint }.into()),
            border: Border {
                color: Color { a: 0.35, ..tint },
                width: 1.0,
                radius: 6.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

/// Dark rounded card background
pub fn panel_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(PANEL.into()),
        border: Border {
            color: Color::from_rgb(0.2, 0.23, 0.28),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}

/// Layer `content` over `base` with a dimmed backdrop.
///
/// Clicking the backdrop emits `on_blur`.
pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Kunci Momen"), "KM");
        assert_eq!(initials("Multimeter Digital Fluke"), "MD");
        assert_eq!(initials("pak hendra"), "PH");
        assert_eq!(initials("Dongkrak"), "D");
        assert_eq!(initials("   "), "");
    }
}
