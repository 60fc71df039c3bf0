//! Channel queries and the content/chat mutation API.

use serde::Serialize;
use tracing::{debug, info};

use campus_shared::directory;
use campus_shared::types::{ChannelId, UserId};
use campus_store::{Channel, Message, NewContent, StoreError, User};

use super::simulate_latency;
use crate::error::{CommandError, Missing};
use crate::events::{emit_event, AppEvent};
use crate::state::{lock, SharedState};

/// A channel as listed on the student dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub channel: Channel,
    pub is_subscribed: bool,
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// Channels matching both filters when given.
pub fn list_channels(
    state: &SharedState,
    university: Option<&str>,
    college: Option<&str>,
) -> Result<Vec<Channel>, CommandError> {
    let guard = lock(state)?;
    Ok(guard.repository.list_channels(university, college))
}

pub fn get_channel(state: &SharedState, channel_id: &ChannelId) -> Result<Channel, CommandError> {
    let guard = lock(state)?;
    Ok(guard.repository.get_channel(channel_id)?)
}

/// Professor dashboard.
pub fn channels_owned_by(state: &SharedState, professor_id: &UserId) -> Result<Vec<Channel>, CommandError> {
    let guard = lock(state)?;
    Ok(guard.repository.list_channels_owned_by(professor_id))
}

/// Student dashboard: channels for the selected affiliation, each flagged
/// with whether `student` is already subscribed.
pub fn student_catalog(
    state: &SharedState,
    student: &User,
    university: Option<&str>,
    college: Option<&str>,
) -> Result<Vec<CatalogEntry>, CommandError> {
    let guard = lock(state)?;
    let entries = guard
        .repository
        .list_channels(university, college)
        .into_iter()
        .map(|channel| CatalogEntry {
            is_subscribed: channel.is_subscriber(&student.id),
            channel,
        })
        .collect();
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Create / Update
// ---------------------------------------------------------------------------

pub async fn create_channel(
    state: &SharedState,
    professor_id: &UserId,
    name: &str,
    university: &str,
    college: &str,
) -> Result<Channel, CommandError> {
    let name = name.trim();
    if !directory::is_valid_channel_name(university, college, name) {
        return Err(CommandError::InvalidInput(format!(
            "Unknown specialization: {university} / {college} / {name}"
        )));
    }

    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;
    let channel = st
        .repository
        .create_channel(professor_id, name, university, college)
        .map_err(|e| match e {
            StoreError::UserNotFound(id) => CommandError::NotFound(Missing::Professor(id.0)),
            other => other.into(),
        })?;
    emit_event(&st.events, AppEvent::ChannelUpdated(channel.clone()));

    info!(channel_id = %channel.id, professor_id = %professor_id, name, "Channel created");
    Ok(channel)
}

/// Append content to a channel.  Only the owning professor may publish.
pub async fn publish_content(
    state: &SharedState,
    channel_id: &ChannelId,
    publisher: &User,
    content: NewContent,
) -> Result<Channel, CommandError> {
    if content.url.trim().is_empty() {
        return Err(CommandError::InvalidInput("Content locator is empty".into()));
    }

    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;
    let channel = st.repository.get_channel(channel_id)?;
    if !(publisher.is_professor() && channel.is_owner(&publisher.id)) {
        return Err(CommandError::AccessDenied(format!(
            "{} does not own channel {}",
            publisher.id, channel_id
        )));
    }

    let kind = content.kind;
    let channel = st.repository.publish_content(channel_id, content)?;
    emit_event(&st.events, AppEvent::ChannelUpdated(channel.clone()));

    info!(channel_id = %channel_id, kind = ?kind, "Content published");
    Ok(channel)
}

/// Post to a channel's chat.  The sender must be the owner or a subscriber.
pub async fn send_channel_message(
    state: &SharedState,
    channel_id: &ChannelId,
    sender: &User,
    text: &str,
) -> Result<Channel, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::InvalidInput("Message is empty".into()));
    }

    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;
    let channel = st.repository.get_channel(channel_id)?;
    if !channel.can_access(sender) {
        return Err(CommandError::AccessDenied(format!(
            "{} is not a member of channel {}",
            sender.id, channel_id
        )));
    }

    let channel = st
        .repository
        .append_channel_message(channel_id, Message::new(sender, text))?;
    emit_event(&st.events, AppEvent::ChannelUpdated(channel.clone()));

    debug!(channel_id = %channel_id, sender_id = %sender.id, "Channel message sent");
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use campus_shared::types::{ContentKind, Role};

    use super::*;
    use crate::commands::auth::login;
    use crate::testing::shared_state;

    fn pdf() -> NewContent {
        NewContent {
            kind: ContentKind::Pdf,
            url: "https://example.com/cours.pdf".into(),
            file_name: Some("cours.pdf".into()),
            thumbnail: None,
        }
    }

    #[test]
    fn list_channels_applies_both_filters() {
        let state = shared_state();
        let all = list_channels(&state, None, None).unwrap();
        assert_eq!(all.len(), 5);

        let chan1 = get_channel(&state, &ChannelId::from("chan1")).unwrap();
        let same_college = list_channels(&state, Some(&chan1.university), Some(&chan1.college)).unwrap();
        assert!(same_college
            .iter()
            .all(|c| c.university == chan1.university && c.college == chan1.college));
        assert_eq!(same_college.len(), 2);

        assert!(list_channels(&state, Some(&chan1.university), Some("nowhere"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn student_catalog_flags_subscriptions() {
        let state = shared_state();
        let student = lock(&state).unwrap().repository.get_user(&UserId::from("stud1")).unwrap();
        let catalog = student_catalog(&state, &student, None, None).unwrap();
        let flagged: Vec<_> = catalog
            .iter()
            .filter(|e| e.is_subscribed)
            .map(|e| e.channel.id.as_str().to_string())
            .collect();
        assert_eq!(flagged, vec!["chan1".to_string()]);
    }

    #[test]
    fn channels_owned_by_professor() {
        let state = shared_state();
        let owned = channels_owned_by(&state, &UserId::from("prof1")).unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|c| c.professor_id.as_str() == "prof1"));
    }

    #[tokio::test]
    async fn create_channel_for_unknown_professor_fails() {
        let state = shared_state();
        let chan1 = get_channel(&state, &ChannelId::from("chan1")).unwrap();
        let err = create_channel(&state, &UserId::from("ghost"), &chan1.name, &chan1.university, &chan1.college)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(Missing::Professor(_))));
        assert_eq!(list_channels(&state, None, None).unwrap().len(), 5);
    }

    #[tokio::test]
    async fn create_channel_rejects_specialization_outside_directory() {
        let state = shared_state();
        let chan1 = get_channel(&state, &ChannelId::from("chan1")).unwrap();
        let err = create_channel(&state, &UserId::from("prof1"), "Astrology", &chan1.university, &chan1.college)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn create_channel_starts_empty() {
        let state = shared_state();
        let chan1 = get_channel(&state, &ChannelId::from("chan1")).unwrap();
        let channel = create_channel(&state, &UserId::from("prof1"), &chan1.name, &chan1.university, &chan1.college)
            .await
            .unwrap();
        assert!(channel.content.is_empty());
        assert!(channel.chat_messages.is_empty());
        assert!(channel.subscribers.is_empty());
        assert!(!channel.google_meet_link.is_empty());
        assert_eq!(get_channel(&state, &channel.id).unwrap(), channel);
    }

    #[tokio::test]
    async fn owner_publishes_and_others_are_denied() {
        let state = shared_state();
        let owner = login(&state, "prof1@example.com", Role::Professor).await.unwrap();
        let before = get_channel(&state, &ChannelId::from("chan1")).unwrap().content.len();

        let channel = publish_content(&state, &ChannelId::from("chan1"), &owner, pdf())
            .await
            .unwrap();
        assert_eq!(channel.content.len(), before + 1);
        let added = channel.content.last().unwrap();
        assert_eq!(added.file_name.as_deref(), Some("cours.pdf"));

        let other = login(&state, "prof2@example.com", Role::Professor).await.unwrap();
        let err = publish_content(&state, &ChannelId::from("chan1"), &other, pdf())
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn publish_to_unknown_channel_is_not_found() {
        let state = shared_state();
        let owner = login(&state, "prof1@example.com", Role::Professor).await.unwrap();
        let err = publish_content(&state, &ChannelId::from("nope"), &owner, pdf())
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(Missing::Channel(_))));
    }

    #[tokio::test]
    async fn message_to_unknown_channel_leaves_registry_unchanged() {
        let state = shared_state();
        let user = login(&state, "stud1@example.com", Role::Student).await.unwrap();
        let before = list_channels(&state, None, None).unwrap();

        let err = send_channel_message(&state, &ChannelId::from("nope"), &user, "hi")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(list_channels(&state, None, None).unwrap(), before);
    }

    #[tokio::test]
    async fn subscriber_message_carries_sender_identity() {
        let state = shared_state();
        let mut rx = crate::state::subscribe_events(&state).unwrap();
        let user = login(&state, "stud1@example.com", Role::Student).await.unwrap();

        let channel = send_channel_message(&state, &ChannelId::from("chan1"), &user, " hi ")
            .await
            .unwrap();
        let msg = channel.chat_messages.last().unwrap();
        assert_eq!(msg.sender_id, user.id);
        assert_eq!(msg.sender_name, user.name);
        assert_eq!(msg.text, "hi");

        // SessionChanged from login, then the channel update.
        assert!(matches!(rx.recv().await.unwrap(), AppEvent::SessionChanged(_)));
        assert!(matches!(rx.recv().await.unwrap(), AppEvent::ChannelUpdated(c) if c.id == channel.id));
    }

    #[tokio::test]
    async fn non_member_cannot_post() {
        let state = shared_state();
        let user = login(&state, "stud2@example.com", Role::Student).await.unwrap();
        let err = send_channel_message(&state, &ChannelId::from("chan1"), &user, "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::AccessDenied(_)));
    }
}
