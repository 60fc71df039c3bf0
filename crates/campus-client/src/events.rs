use campus_store::{Channel, PrivateChat, ProfileSettings, User};
use serde::Serialize;
use tokio::sync::broadcast;

pub const EVENT_SESSION_CHANGED: &str = "session-changed";
pub const EVENT_SETTINGS_CHANGED: &str = "settings-changed";
pub const EVENT_CHANNEL_UPDATED: &str = "channel-updated";
pub const EVENT_CHAT_UPDATED: &str = "chat-updated";

/// Notification published after every successful mutation so that open
/// screens can re-render from the fresh aggregate.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum AppEvent {
    SessionChanged(Option<User>),
    SettingsChanged(ProfileSettings),
    ChannelUpdated(Channel),
    ChatUpdated(PrivateChat),
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::SessionChanged(_) => EVENT_SESSION_CHANGED,
            AppEvent::SettingsChanged(_) => EVENT_SETTINGS_CHANGED,
            AppEvent::ChannelUpdated(_) => EVENT_CHANNEL_UPDATED,
            AppEvent::ChatUpdated(_) => EVENT_CHAT_UPDATED,
        }
    }
}

pub fn emit_event(tx: &broadcast::Sender<AppEvent>, event: AppEvent) {
    let name = event.name();
    if tx.send(event).is_err() {
        // No open screen is listening; nothing to refresh.
        tracing::trace!(event = name, "event dropped, no subscribers");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_their_name() {
        let json = serde_json::to_value(AppEvent::SessionChanged(None)).unwrap();
        assert_eq!(json["event"], EVENT_SESSION_CHANGED);
        assert!(json["payload"].is_null());
    }

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let (tx, mut rx) = broadcast::channel(4);
        emit_event(&tx, AppEvent::SettingsChanged(ProfileSettings::default()));
        let got = rx.recv().await.unwrap();
        assert_eq!(got.name(), EVENT_SETTINGS_CHANGED);
    }

    #[test]
    fn emitting_without_subscribers_is_harmless() {
        let (tx, rx) = broadcast::channel::<AppEvent>(4);
        drop(rx);
        emit_event(&tx, AppEvent::SessionChanged(None));
    }
}
