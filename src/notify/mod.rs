pub mod channel;
pub mod console;
pub mod silent;

pub use channel::{ChannelNotifier, UpdateEvent};
pub use console::ConsoleNotifier;
pub use silent::SilentNotifier;

/// The user's answer to the update banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    Accepted,
    Dismissed,
}

/// Toasts and the update banner, as opaque operations. Rendering belongs to
/// the adapter; the orchestrator only decides what to say and when.
pub trait Notifier {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);

    /// Puts up the accept/ignore banner for `plugin_name` and reports the
    /// choice. Adapters that cannot block report `Dismissed` and surface the
    /// offer through their own channel instead.
    fn prompt_update(&self, plugin_name: &str) -> PromptResponse;
}
