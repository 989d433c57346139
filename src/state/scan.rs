//! Scan workflow state machine
//!
//! One `ScanSession` exists while the scanner panel is open:
//!
//! ```text
//! Idle ──select──▶ Previewing ──submit──▶ Analyzing ──complete──▶ Reviewing
//!  ▲                   ▲                                            │
//!  └────── dismiss ────┼──────────────── retry ─────────────────────┘
//! ```
//!
//! Selecting a new image is allowed from every phase and discards the
//! current result. The inference call itself is never cancelled; a result
//! that arrives for an abandoned submission is recognised by its ticket
//! and dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::data::{AnalysisResult, ToolId};

/// Tickets are unique across sessions so a reopened scanner never
/// accepts a result meant for the previous one.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one submission to the inference client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket(u64);

impl ScanTicket {
    fn next() -> Self {
        ScanTicket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Identifies one opening of the scanner panel.
///
/// Background work started for a session (such as reading a picked file)
/// carries this id and is discarded if a different session is open when
/// it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        SessionId(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }
}

/// A captured photo held by the session
#[derive(Clone, PartialEq)]
pub struct ScanImage {
    /// Filename shown under the preview
    pub name: String,
    pub bytes: Arc<Vec<u8>>,
}

impl ScanImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes: Arc::new(bytes),
        }
    }
}

// Skip the payload, it can be several megabytes
impl fmt::Debug for ScanImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanImage")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Previewing,
    Analyzing,
    Reviewing,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanPhase::Idle => "idle",
            ScanPhase::Previewing => "previewing",
            ScanPhase::Analyzing => "analyzing",
            ScanPhase::Reviewing => "reviewing",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScanError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: ScanPhase,
    },
}

#[derive(Debug, Clone)]
enum Stage {
    Idle,
    Previewing { image: ScanImage },
    Analyzing { image: ScanImage, ticket: ScanTicket },
    Reviewing { image: ScanImage, result: AnalysisResult },
}

#[derive(Debug, Clone)]
pub struct ScanSession {
    id: SessionId,
    /// Tool the scan was started from, if any
    target: Option<ToolId>,
    stage: Stage,
}

impl ScanSession {
    pub fn new(target: Option<ToolId>) -> Self {
        Self {
            id: SessionId::next(),
            target,
            stage: Stage::Idle,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn target(&self) -> Option<&ToolId> {
        self.target.as_ref()
    }

    pub fn phase(&self) -> ScanPhase {
        match self.stage {
            Stage::Idle => ScanPhase::Idle,
            Stage::Previewing { .. } => ScanPhase::Previewing,
            Stage::Analyzing { .. } => ScanPhase::Analyzing,
            Stage::Reviewing { .. } => ScanPhase::Reviewing,
        }
    }

    pub fn image(&self) -> Option<&ScanImage> {
        match &self.stage {
            Stage::Idle => None,
            Stage::Previewing { image }
            | Stage::Analyzing { image, .. }
            | Stage::Reviewing { image, .. } => Some(image),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.stage {
            Stage::Reviewing { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Hold a new image for preview, discarding any previous result
    pub fn select_image(&mut self, image: ScanImage) {
        debug!(from = %self.phase(), image = %image.name, "scan image selected");
        self.stage = Stage::Previewing { image };
    }

    /// Start analysis of the previewed image.
    ///
    /// Returns the ticket to hand back to `complete` together with the
    /// bytes to send to the inference client.
    pub fn submit(&mut self) -> Result<(ScanTicket, Arc<Vec<u8>>), ScanError> {
        let image = match &self.stage {
            Stage::Previewing { image } => image.clone(),
            _ => return Err(self.invalid("submit")),
        };

        let ticket = ScanTicket::next();
        let bytes = Arc::clone(&image.bytes);
        debug!(ticket = ticket.0, bytes = bytes.len(), "scan submitted");
        self.stage = Stage::Analyzing { image, ticket };
        Ok((ticket, bytes))
    }

    /// Deliver an analysis result.
    ///
    /// Returns false (and changes nothing) if the session is no longer
    /// waiting for this ticket.
    pub fn complete(&mut self, ticket: ScanTicket, result: AnalysisResult) -> bool {
        let image = match &self.stage {
            Stage::Analyzing { image, ticket: pending } if *pending == ticket => image.clone(),
            _ => {
                debug!(ticket = ticket.0, phase = %self.phase(), "stale scan result dropped");
                return false;
            }
        };

        self.stage = Stage::Reviewing { image, result };
        true
    }

    /// Leave the review and go back to an empty scanner
    pub fn dismiss(&mut self) -> Result<(), ScanError> {
        match self.stage {
            Stage::Reviewing { .. } => {
                self.stage = Stage::Idle;
                Ok(())
            }
            _ => Err(self.invalid("dismiss")),
        }
    }

    /// Leave the review and preview the same image again
    pub fn retry(&mut self) -> Result<(), ScanError> {
        match &self.stage {
            Stage::Reviewing { image, .. } => {
                self.stage = Stage::Previewing {
                    image: image.clone(),
                };
                Ok(())
            }
            _ => Err(self.invalid("retry")),
        }
    }

    fn invalid(&self, action: &'static str) -> ScanError {
        ScanError::InvalidTransition {
            action,
            phase: self.phase(),
        }
    }
}
