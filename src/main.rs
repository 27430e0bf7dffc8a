use iced::widget::{button, column, container, image, row, scrollable, text, Column};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::AsyncFileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

mod config;
mod error;
mod intake;
mod rating;
mod state;
mod ui;

use config::Config;
use error::IntakeError;
use rating::{AnthropicClient, RatingClient};
use state::app::{AppState, RatingFinished};
use state::data::{Preview, PreviewState, UploadedImage};
use state::mode::Mode;

/// Main application state
struct OutfitRater {
    /// Mode, photo, verdict and busy flag
    state: AppState,
    /// Shared with in-flight rating tasks
    client: Arc<dyn RatingClient>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User picked a feedback tone
    ModeSelected(Mode),
    /// User clicked "Upload" or "Change Photo"
    PickPhoto,
    /// File dialog closed
    PhotoPicked(Option<PathBuf>),
    /// A file was dropped on the window
    FileDropped(PathBuf),
    /// Background file read completed
    PhotoLoaded(Result<UploadedImage, IntakeError>),
    /// Background preview decode completed for a selection generation
    PreviewReady(u64, Result<Preview, IntakeError>),
    /// User clicked "Rate My Outfit"
    RateOutfit,
    /// Rating request completed
    RatingFinished(RatingFinished),
    /// User closed the notice banner
    DismissNotice,
}

impl OutfitRater {
    /// Create a new instance of the application
    fn new(config: Config, client: Arc<dyn RatingClient>) -> (Self, Task<Message>) {
        let mut state = AppState::new(config.initial_mode);

        if config.api_key.is_none() {
            state.report_error(error::RatingError::MissingApiKey.to_string());
        }

        info!("👗 Outfit Rater initialized ({:?})", config);

        (OutfitRater { state, client }, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let before = self.state.phase();
        let task = self.handle(message);

        let after = self.state.phase();
        if before != after {
            debug!("Phase: {:?} -> {:?}", before, after);
        }
        task
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ModeSelected(mode) => {
                self.state.select_mode(mode);
                Task::none()
            }
            Message::PickPhoto => Task::perform(pick_photo(), Message::PhotoPicked),
            Message::PhotoPicked(None) => Task::none(),
            Message::PhotoPicked(Some(path)) | Message::FileDropped(path) => {
                Task::perform(intake::load_image(path), Message::PhotoLoaded)
            }
            Message::PhotoLoaded(Ok(image)) => {
                let bytes = image.bytes.clone();
                let generation = self.state.select_image(image);

                Task::perform(intake::derive_preview(bytes), move |preview| {
                    Message::PreviewReady(generation, preview)
                })
            }
            Message::PhotoLoaded(Err(err)) => {
                self.state.report_error(err.to_string());
                Task::none()
            }
            Message::PreviewReady(generation, preview) => {
                self.state.preview_finished(generation, preview);
                Task::none()
            }
            Message::RateOutfit => match rating::submit(&mut self.state, self.client.clone()) {
                Ok(pending) => Task::perform(pending, Message::RatingFinished),
                Err(err) => {
                    warn!("Rating not started: {}", err);
                    Task::none()
                }
            },
            Message::RatingFinished(finished) => {
                self.state.finish_rating(finished);
                Task::none()
            }
            Message::DismissNotice => {
                self.state.dismiss_notice();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("👗 Rate My Outfit").size(44),
            text("Get honest fashion feedback powered by AI").size(18),
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        let modes = column![
            text("Choose Your Vibe").size(22),
            ui::mode_picker::view(self.state.mode()),
        ]
        .spacing(14);

        let mut content: Column<Message> = column![header, modes].spacing(28);

        if let Some(notice) = self.state.notice() {
            content = content.push(
                container(
                    row![
                        text(notice).size(15).width(Length::Fill),
                        button("Dismiss")
                            .on_press(Message::DismissNotice)
                            .style(button::text),
                    ]
                    .spacing(12)
                    .align_y(Alignment::Center),
                )
                .padding(12)
                .width(Length::Fill)
                .style(container::rounded_box),
            );
        }

        content = content.push(self.upload_section());

        if let Some(result) = self.state.result() {
            content = content.push(ui::verdict::view(result));
        }

        content = content.push(
            column![
                text("Powered by Claude × Anthropic API").size(13),
                text("#ClaudeRatesMyOutfit").size(13),
            ]
            .spacing(4)
            .align_x(Alignment::Center)
            .width(Length::Fill),
        );

        scrollable(
            container(content.padding(32).max_width(900))
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .into()
    }

    /// Photo picker before selection, preview plus actions after
    fn upload_section(&self) -> Element<'_, Message> {
        let Some(photo) = self.state.image() else {
            let prompt = column![
                text("📤").size(48),
                text("Upload Your Outfit Photo").size(22),
                text("Click to select or drag & drop").size(15),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .width(Length::Fill);

            return button(prompt)
                .on_press(Message::PickPhoto)
                .style(button::secondary)
                .padding(48)
                .width(Length::Fill)
                .into();
        };

        let preview: Element<Message> = match self.state.preview() {
            Some(PreviewState::Ready(preview)) => image(preview.handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(384.0))
                .into(),
            Some(PreviewState::Failed(reason)) => text(format!("No preview available: {}", reason))
                .size(15)
                .into(),
            Some(PreviewState::Pending) | None => text("Loading preview...").size(15).into(),
        };

        let rate_label = if self.state.is_busy() {
            "Rating..."
        } else {
            "✨ Rate My Outfit"
        };

        let actions = row![
            button(text("Change Photo").width(Length::Fill).align_x(Alignment::Center))
                .on_press(Message::PickPhoto)
                .style(button::secondary)
                .padding(12)
                .width(Length::Fill),
            button(text(rate_label).width(Length::Fill).align_x(Alignment::Center))
                .on_press_maybe(self.state.can_rate().then_some(Message::RateOutfit))
                .style(button::primary)
                .padding(12)
                .width(Length::Fill),
        ]
        .spacing(12);

        column![
            preview,
            text(photo.display_name()).size(13),
            actions,
        ]
        .spacing(14)
        .align_x(Alignment::Center)
        .into()
    }

    /// Listen for files dropped onto the window
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Show the native file dialog without blocking the UI
async fn pick_photo() -> Option<PathBuf> {
    AsyncFileDialog::new()
        .set_title("Select Your Outfit Photo")
        .add_filter("Images", intake::loader::PICKER_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// Initialize logging, honouring `RUST_LOG` when it parses
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,outfit_rater=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn main() -> iced::Result {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Invalid configuration, check the environment or .env");
            std::process::exit(2);
        }
    };

    let client: Arc<dyn RatingClient> = match AnthropicClient::new(config.clone()) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!("Could not create HTTP client: {}", err);
            std::process::exit(1);
        }
    };

    iced::application("Outfit Rater", OutfitRater::update, OutfitRater::view)
        .subscription(OutfitRater::subscription)
        .theme(OutfitRater::theme)
        .centered()
        .run_with(move || OutfitRater::new(config, client))
}
