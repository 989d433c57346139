use chrono::Utc;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, stack, text};
use iced::widget::image::Handle;
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod inference;
mod state;
mod ui;

use config::{InferenceConfig, LogConfig};
use inference::InferenceClient;
use state::data::{AnalysisResult, LoanId, ToolCondition, ToolId, User};
use state::inventory::Inventory;
use state::scan::{ScanImage, ScanSession, ScanTicket, SessionId};

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Inventory,
    Loans,
}

/// Main application state
struct BengkelMate {
    /// Tools and loans, alive for the whole process
    inventory: Inventory,
    /// Stateless; cloned into each analysis task
    inference: InferenceClient,
    /// The mechanic running this session
    current_user: User,
    tab: Tab,
    /// Tool shown in the detail modal
    detail: Option<ToolId>,
    show_profile: bool,
    /// Open scanner session, dropped when the panel closes
    scanner: Option<ScanSession>,
    /// Decoded preview of the scanner image
    scan_preview: Option<Handle>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    TabSelected(Tab),
    OpenDetail(ToolId),
    CloseDetail,
    Borrow(ToolId),
    /// The user agreed to the borrow confirmation
    BorrowConfirmed(ToolId),
    ReportIssue(ToolId),
    ReturnLoan(LoanId),
    OpenProfile,
    CloseProfile,
    /// Open the scanner, optionally for a specific tool
    OpenScanner(Option<ToolId>),
    CloseScanner,
    /// User clicked "Take Photo or Upload"
    PickImage,
    /// Background file read finished for the given scanner session
    ImageLoaded(SessionId, Result<ScanImage, String>),
    Analyze,
    /// Inference call finished (successfully or with the fallback result)
    AnalysisComplete(ScanTicket, AnalysisResult),
    ApplyCondition(ToolId, ToolCondition),
    DismissReview,
    RetryScan,
}

impl BengkelMate {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let inference = InferenceClient::new(InferenceConfig::from_env());
        let config = inference.config();
        if !config.has_credential() {
            warn!("no GEMINI_API_KEY or API_KEY set; scans will return the fallback result");
        }
        info!(model = %config.model, endpoint = %config.endpoint, "inference client configured");

        let inventory = Inventory::seeded();
        let status = format!("Ready. {} tools in inventory.", inventory.list().len());

        (
            BengkelMate {
                inventory,
                inference,
                current_user: state::seed::current_user(),
                tab: Tab::Inventory,
                detail: None,
                show_profile: false,
                scanner: None,
                scan_preview: None,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.tab = tab;
            }
            Message::OpenDetail(id) => {
                self.detail = Some(id);
            }
            Message::CloseDetail => {
                self.detail = None;
            }
            Message::Borrow(id) => {
                let Some(tool) = self.inventory.get(&id) else {
                    return Task::none();
                };

                let answer = MessageDialog::new()
                    .set_level(MessageLevel::Info)
                    .set_title("BengkelMate")
                    .set_description(format!("Konfirmasi peminjaman: {}?", tool.name))
                    .set_buttons(MessageButtons::YesNo)
                    .show();

                if matches!(answer, MessageDialogResult::Yes) {
                    return Task::done(Message::BorrowConfirmed(id));
                }
            }
            Message::BorrowConfirmed(id) => {
                match self.inventory.borrow(&id, &self.current_user, Utc::now()) {
                    Ok(_) => {
                        let name = self
                            .inventory
                            .get(&id)
                            .map(|tool| tool.name.clone())
                            .unwrap_or_default();
                        self.status = format!("✅ {} berhasil dipinjam!", name);
                        self.detail = None;
                    }
                    Err(err) => self.report(err),
                }
            }
            Message::ReportIssue(id) => match self.inventory.report_issue(&id) {
                Ok(tool) => {
                    self.status = format!("⚠️  {} reported as damaged.", tool.name);
                }
                Err(err) => self.report(err),
            },
            Message::ReturnLoan(loan_id) => {
                match self.inventory.return_loan(&loan_id, Utc::now()) {
                    Ok(loan) => {
                        self.status = format!("Loan {} returned by {}.", loan.id, loan.user_name);
                    }
                    Err(err) => self.report(err),
                }
            }
            Message::OpenProfile => {
                self.show_profile = true;
            }
            Message::CloseProfile => {
                self.show_profile = false;
            }
            Message::OpenScanner(target) => {
                self.detail = None;
                self.scanner = Some(ScanSession::new(target));
                self.scan_preview = None;
            }
            Message::CloseScanner => {
                // An in-flight analysis keeps running; its result will be dropped
                self.scanner = None;
                self.scan_preview = None;
            }
            Message::PickImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select a Photo of the Tool")
                    .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
                    .pick_file();

                let session = self.scanner.as_ref().map(ScanSession::id);
                if let (Some(session), Some(path)) = (session, file) {
                    return Task::perform(load_image(path), move |loaded| {
                        Message::ImageLoaded(session, loaded)
                    });
                }
            }
            Message::ImageLoaded(session_id, Ok(image)) => {
                match self.scanner.as_mut() {
                    Some(session) if session.id() == session_id => {
                        self.scan_preview = Some(Handle::from_bytes(image.bytes.to_vec()));
                        session.select_image(image);
                    }
                    _ => info!(file = %image.name, "image finished loading after the scan was closed"),
                }
            }
            Message::ImageLoaded(_, Err(err)) => {
                warn!(error = %err, "could not read scan image");
                self.status = format!("⚠️  {}", err);
            }
            Message::Analyze => {
                let Some(session) = self.scanner.as_mut() else {
                    return Task::none();
                };

                match session.submit() {
                    Ok((ticket, bytes)) => {
                        let client = self.inference.clone();
                        return Task::perform(
                            async move { client.analyze(&bytes).await },
                            move |result| Message::AnalysisComplete(ticket, result),
                        );
                    }
                    Err(err) => self.report(err),
                }
            }
            Message::AnalysisComplete(ticket, result) => {
                let applied = self
                    .scanner
                    .as_mut()
                    .map(|session| session.complete(ticket, result))
                    .unwrap_or(false);
                if !applied {
                    info!("analysis finished after the scan was abandoned");
                }
            }
            Message::ApplyCondition(id, condition) => {
                match self.inventory.set_condition(&id, condition) {
                    Ok(tool) => {
                        self.status = format!("{} condition set to {}.", tool.name, condition);
                    }
                    Err(err) => self.report(err),
                }
            }
            Message::DismissReview => {
                if let Some(session) = self.scanner.as_mut() {
                    match session.dismiss() {
                        Ok(()) => self.scan_preview = None,
                        Err(err) => warn!(error = %err, "dismiss ignored"),
                    }
                }
            }
            Message::RetryScan => {
                if let Some(session) = self.scanner.as_mut() {
                    if let Err(err) = session.retry() {
                        warn!(error = %err, "retry ignored");
                    }
                }
            }
        }

        Task::none()
    }

    /// Show a failed action in the status bar
    fn report(&mut self, err: impl std::fmt::Display) {
        warn!(error = %err, "action failed");
        self.status = format!("❌ {}", err);
    }

    fn header(&self) -> Element<'_, Message> {
        let brand = column![
            row![
                text("BENGKEL").size(26),
                text("MATE").size(26).color(ui::ACCENT),
            ],
            text("WORKSHOP OS V1.0").size(10).color(ui::MUTED),
        ];

        let profile = button(
            column![
                text(&self.current_user.name).size(14),
                text(self.current_user.role.to_string()).size(11).color(ui::MUTED),
            ]
            .align_x(Alignment::End),
        )
        .on_press(Message::OpenProfile)
        .style(button::text);

        row![brand, horizontal_space(), profile]
            .align_y(Alignment::Center)
            .into()
    }

    fn tabs(&self) -> Element<'_, Message> {
        let tab = |label: &'static str, target: Tab| {
            let style = if self.tab == target {
                button::primary
            } else {
                button::text
            };
            button(text(label).size(13))
                .on_press(Message::TabSelected(target))
                .style(style)
        };

        row![
            tab("INVENTORY", Tab::Inventory),
            tab("ACTIVE LOANS", Tab::Loans),
        ]
        .spacing(12)
        .into()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.tab {
            Tab::Inventory => column![
                ui::stats::overview(self.inventory.stats()),
                ui::tool_card::tool_grid(self.inventory.list()),
            ]
            .spacing(24)
            .into(),
            Tab::Loans => ui::loans::active_loans(&self.inventory),
        };

        let page = column![
            self.header(),
            self.tabs(),
            scrollable(body).height(Length::Fill),
            text(&self.status).size(13).color(ui::MUTED),
        ]
        .spacing(20)
        .padding(24);

        let scan_button = container(
            button(text("SCAN").size(16))
                .padding(18)
                .style(button::primary)
                .on_press(Message::OpenScanner(None)),
        )
        .padding(32)
        .align_right(Length::Fill)
        .align_bottom(Length::Fill);

        let base: Element<'_, Message> = stack![page, scan_button].into();

        if let Some(session) = &self.scanner {
            let target = session.target().and_then(|id| self.inventory.get(id));
            let content = ui::scanner::scanner(session, self.scan_preview.as_ref(), target);
            return ui::modal(base, content, Message::CloseScanner);
        }

        if let Some(tool) = self.detail.as_ref().and_then(|id| self.inventory.get(id)) {
            let history = self
                .inventory
                .loans()
                .iter()
                .filter(|loan| loan.tool_id == tool.id)
                .rev()
                .collect();
            let content = ui::detail::tool_detail(tool, history);
            return ui::modal(base, content, Message::CloseDetail);
        }

        if self.show_profile {
            let content = ui::profile::profile(&self.current_user, &self.inventory);
            return ui::modal(base, content, Message::CloseProfile);
        }

        base
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Install the global tracing subscriber
fn init_logging() {
    let log = LogConfig::from_env();
    let filter = EnvFilter::try_new(&log.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if log.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn main() -> iced::Result {
    init_logging();

    iced::application("BengkelMate", BengkelMate::update, BengkelMate::view)
        .theme(BengkelMate::theme)
        .centered()
        .run_with(BengkelMate::new)
}

/// Read a picked photo off the UI thread
async fn load_image(path: PathBuf) -> Result<ScanImage, String> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    info!(file = %name, bytes = bytes.len(), "scan image loaded");
    Ok(ScanImage::new(name, bytes))
}
