use std::sync::mpsc;

use super::{Notifier, PromptResponse};

/// Notification payloads forwarded to an embedding host's event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    Info(String),
    Success(String),
    Error(String),
    /// The banner, delegated: the host renders the offer and calls
    /// `Updater::install_update` itself when the user accepts.
    UpdateOffered { plugin_name: String },
}

/// Forwards every notification over an `mpsc::Sender` for hosts that own
/// their own UI loop. The prompt never blocks: it emits `UpdateOffered` and
/// reports `Dismissed`, leaving the install decision with the host.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<UpdateEvent>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::Sender<UpdateEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: UpdateEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("update event receiver dropped");
        }
    }
}

impl Notifier for ChannelNotifier {
    fn info(&self, message: &str) {
        self.send(UpdateEvent::Info(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.send(UpdateEvent::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.send(UpdateEvent::Error(message.to_string()));
    }

    fn prompt_update(&self, plugin_name: &str) -> PromptResponse {
        self.send(UpdateEvent::UpdateOffered {
            plugin_name: plugin_name.to_string(),
        });
        PromptResponse::Dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_toasts_and_offers_as_events() {
        let (tx, rx) = mpsc::channel();
        let notifier = ChannelNotifier::new(tx);

        notifier.info("checking");
        notifier.success("MyPlugin updated");
        let response = notifier.prompt_update("MyPlugin");

        assert_eq!(response, PromptResponse::Dismissed);
        assert_eq!(rx.recv().unwrap(), UpdateEvent::Info("checking".into()));
        assert_eq!(
            rx.recv().unwrap(),
            UpdateEvent::Success("MyPlugin updated".into())
        );
        assert_eq!(
            rx.recv().unwrap(),
            UpdateEvent::UpdateOffered {
                plugin_name: "MyPlugin".into()
            }
        );
    }

    #[test]
    fn dropped_receiver_is_not_an_error() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let notifier = ChannelNotifier::new(tx);
        notifier.error("nobody listening");
    }
}
