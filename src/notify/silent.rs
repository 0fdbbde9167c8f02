use super::{Notifier, PromptResponse};

/// Bannerless rendition: toasts go to the log only and no offer is ever
/// accepted.
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn prompt_update(&self, plugin_name: &str) -> PromptResponse {
        tracing::info!("update available for {plugin_name}");
        PromptResponse::Dismissed
    }
}
