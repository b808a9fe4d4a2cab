//! Notification of match creation to out-of-band listeners.

use match_core::Match;
use thiserror::Error;

use crate::ws::{FeedBroadcast, FeedMessage};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
}

/// Receives every successfully created match.
///
/// Called at most once per creation, after the row is stored and before the
/// response is sent. Errors are logged by the caller and never affect the
/// response.
pub trait MatchNotifier: Send + Sync {
    fn match_created(&self, created: &Match) -> Result<(), NotifyError>;
}

/// Notifier that does nothing. Used when the live feed is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl MatchNotifier for NoopNotifier {
    fn match_created(&self, _created: &Match) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Publishes created matches to the websocket feed.
#[derive(Clone)]
pub struct BroadcastNotifier {
    feed: FeedBroadcast,
}

impl BroadcastNotifier {
    pub fn new(feed: FeedBroadcast) -> Self {
        Self { feed }
    }
}

impl MatchNotifier for BroadcastNotifier {
    fn match_created(&self, created: &Match) -> Result<(), NotifyError> {
        let msg = FeedMessage::MatchCreated {
            data: created.clone(),
        };
        match self.feed.send(msg) {
            Ok(receivers) => tracing::debug!(match_id = created.id, receivers, "Broadcast match"),
            // No subscribers is not a failure: nobody is listening yet.
            Err(_) => tracing::debug!(match_id = created.id, "No feed subscribers"),
        }
        Ok(())
    }
}
