//! Rating request module
//!
//! This module handles:
//! - Building the prompt for the selected mode (prompt.rs)
//! - Encoding the request and decoding the response (request.rs)
//! - Talking to the API over HTTPS (client.rs)

pub mod client;
pub mod prompt;
pub mod request;

use std::future::Future;
use std::sync::Arc;

pub use client::{AnthropicClient, RatingClient};

use crate::error::RatingError;
use crate::state::app::{AppState, RatingFinished};

/// Start a rating for the current photo and mode.
///
/// The photo and mode are pinned now; the returned future performs the one
/// network call and reports back with the pinned generation. Nothing is sent
/// when the state refuses to start a request.
pub fn submit(
    state: &mut AppState,
    client: Arc<dyn RatingClient>,
) -> Result<impl Future<Output = RatingFinished> + Send + 'static, RatingError> {
    let ticket = state.begin_rating()?;

    Ok(async move {
        let outcome = client.rate(&ticket.image, ticket.mode).await;
        RatingFinished {
            generation: ticket.generation,
            mode: ticket.mode,
            outcome,
        }
    })
}
