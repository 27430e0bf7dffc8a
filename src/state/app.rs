//! Application state and its transitions
//!
//! All mutable UI state lives in [`AppState`] and changes only through the
//! methods below, which follow the flow
//! `Idle -> ImageSelected -> Requesting -> Rated | Errored`.
//! Selecting a new photo re-enters `ImageSelected` from any phase.

use tracing::{debug, info, warn};

use super::data::{Preview, PreviewState, RatingResult, UploadedImage};
use super::mode::Mode;
use crate::error::{IntakeError, RatingError};

/// Coarse phase of the application, derived from [`AppState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No photo selected yet
    Idle,
    /// A photo is selected and no verdict exists for it
    ImageSelected,
    /// A request for the current photo is outstanding
    Requesting,
    /// The last request for the current photo succeeded
    Rated,
    /// The last request for the current photo failed
    Errored,
}

/// Everything a rating request needs, pinned when the request starts
#[derive(Debug, Clone)]
pub struct RatingTicket {
    /// Selection generation the request belongs to
    pub generation: u64,
    pub mode: Mode,
    pub image: UploadedImage,
}

/// Completion of a rating request, fed back into the state
#[derive(Debug, Clone)]
pub struct RatingFinished {
    pub generation: u64,
    pub mode: Mode,
    pub outcome: Result<String, RatingError>,
}

/// What `finish_rating` did with a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    Rated,
    Errored,
    /// The photo changed while the request was in flight
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastOutcome {
    Rated,
    Errored,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    mode: Mode,
    image: Option<UploadedImage>,
    preview: Option<PreviewState>,
    result: Option<RatingResult>,
    last_outcome: Option<LastOutcome>,
    /// User-visible error or warning banner
    notice: Option<String>,
    /// Bumped on every photo selection
    generation: u64,
    /// Generation of the outstanding request, if any
    in_flight: Option<u64>,
}

impl AppState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewState> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&RatingResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// True strictly while a rating request is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the rate action should be enabled
    pub fn can_rate(&self) -> bool {
        self.image.is_some() && !self.is_busy()
    }

    pub fn phase(&self) -> Phase {
        if self.image.is_none() {
            return Phase::Idle;
        }
        if self.in_flight == Some(self.generation) {
            return Phase::Requesting;
        }
        match self.last_outcome {
            Some(LastOutcome::Rated) => Phase::Rated,
            Some(LastOutcome::Errored) => Phase::Errored,
            None => Phase::ImageSelected,
        }
    }

    /// Change the feedback tone; affects only requests started afterwards
    pub fn select_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("Mode changed: {} -> {}", self.mode.id(), mode.id());
            self.mode = mode;
        }
    }

    /// Replace the current photo and drop any previous verdict.
    ///
    /// Returns the new selection generation, used to match the preview
    /// and any later response to this photo.
    pub fn select_image(&mut self, image: UploadedImage) -> u64 {
        self.generation += 1;
        info!(
            "📷 Selected {} ({} bytes, {})",
            image.display_name(),
            image.size_bytes(),
            image.media_type
        );

        self.image = Some(image);
        self.preview = Some(PreviewState::Pending);
        self.result = None;
        self.last_outcome = None;
        self.notice = None;
        self.generation
    }

    /// Store the preview for a selection; previews of replaced photos are ignored
    pub fn preview_finished(&mut self, generation: u64, preview: Result<Preview, IntakeError>) {
        if generation != self.generation || self.image.is_none() {
            debug!("Ignoring preview for replaced photo (generation {})", generation);
            return;
        }

        match preview {
            Ok(preview) => {
                debug!("Preview ready: {}x{}", preview.width, preview.height);
                self.preview = Some(PreviewState::Ready(preview));
            }
            Err(err) => {
                warn!("Preview failed: {}", err);
                let message = err.to_string();
                self.preview = Some(PreviewState::Failed(message.clone()));
                self.notice = Some(message);
            }
        }
    }

    /// Show an error that does not change the selection (e.g. unreadable file)
    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.notice = Some(message);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Start a rating request for the current photo and mode.
    ///
    /// Fails without side effects on the selection when no photo is
    /// selected or a request is already outstanding.
    pub fn begin_rating(&mut self) -> Result<RatingTicket, RatingError> {
        let image = match &self.image {
            Some(image) => image.clone(),
            None => {
                let err = RatingError::MissingImage;
                self.notice = Some(err.to_string());
                return Err(err);
            }
        };
        if self.is_busy() {
            return Err(RatingError::Busy);
        }

        self.in_flight = Some(self.generation);
        self.notice = None;

        Ok(RatingTicket {
            generation: self.generation,
            mode: self.mode,
            image,
        })
    }

    /// Apply a completed request. Always clears the busy flag.
    ///
    /// A failure leaves the previous verdict in place. A response for a
    /// photo that has since been replaced is dropped.
    pub fn finish_rating(&mut self, finished: RatingFinished) -> FinishOutcome {
        self.in_flight = None;

        if finished.generation != self.generation {
            info!(
                "Discarding response for replaced photo (generation {}, current {})",
                finished.generation, self.generation
            );
            return FinishOutcome::Discarded;
        }

        match finished.outcome {
            Ok(verdict) => {
                info!("✅ Rating received ({} chars, {})", verdict.len(), finished.mode.id());
                self.result = Some(RatingResult::new(verdict, finished.mode));
                self.last_outcome = Some(LastOutcome::Rated);
                FinishOutcome::Rated
            }
            Err(err) => {
                warn!("Rating failed: {}", err);
                self.notice = Some(err.to_string());
                self.last_outcome = Some(LastOutcome::Errored);
                FinishOutcome::Errored
            }
        }
    }
}
