//! Private two-party conversations.

use serde::Serialize;
use tracing::{debug, info};

use campus_shared::types::{ChatId, UserId};
use campus_store::{Message, PrivateChat, User};

use super::simulate_latency;
use crate::error::CommandError;
use crate::events::{emit_event, AppEvent};
use crate::state::{lock, SharedState};

/// A chat as listed for one participant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub chat: PrivateChat,
    pub peer_id: UserId,
    /// Falls back to the peer id when the peer is not in the registry.
    pub peer_name: String,
}

pub fn list_chats_for(state: &SharedState, user_id: &UserId) -> Result<Vec<PrivateChat>, CommandError> {
    let guard = lock(state)?;
    Ok(guard.repository.list_chats_for(user_id))
}

/// Chats of `user_id` with the other participant's display name resolved.
pub fn conversations_for(state: &SharedState, user_id: &UserId) -> Result<Vec<Conversation>, CommandError> {
    let guard = lock(state)?;
    let conversations = guard
        .repository
        .list_chats_for(user_id)
        .into_iter()
        .filter_map(|chat| {
            let peer_id = chat.peer_of(user_id)?.clone();
            let peer_name = guard
                .repository
                .get_user(&peer_id)
                .map(|u| u.name)
                .unwrap_or_else(|_| peer_id.to_string());
            Some(Conversation {
                chat,
                peer_id,
                peer_name,
            })
        })
        .collect();
    Ok(conversations)
}

pub fn get_chat(state: &SharedState, chat_id: &ChatId) -> Result<PrivateChat, CommandError> {
    let guard = lock(state)?;
    Ok(guard.repository.get_chat(chat_id)?)
}

/// The chat between `a` and `b` in either order, created empty if absent.
pub async fn get_or_create_chat(state: &SharedState, a: &User, b: &User) -> Result<PrivateChat, CommandError> {
    if a.id == b.id {
        return Err(CommandError::InvalidInput("Cannot open a chat with yourself".into()));
    }

    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;
    let (chat, created) = st.repository.get_or_create_chat(&a.id, &b.id);
    if created {
        emit_event(&st.events, AppEvent::ChatUpdated(chat.clone()));
        info!(chat_id = %chat.id, a = %a.name, b = %b.name, "Private chat opened");
    }
    Ok(chat)
}

pub async fn send_private_message(
    state: &SharedState,
    chat_id: &ChatId,
    sender: &User,
    text: &str,
) -> Result<PrivateChat, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::InvalidInput("Message is empty".into()));
    }

    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;
    let chat = st.repository.get_chat(chat_id)?;
    if !chat.involves(&sender.id) {
        return Err(CommandError::AccessDenied(format!(
            "{} is not a participant of chat {}",
            sender.id, chat_id
        )));
    }

    let chat = st
        .repository
        .append_chat_message(chat_id, Message::new(sender, text))?;
    emit_event(&st.events, AppEvent::ChatUpdated(chat.clone()));

    debug!(chat_id = %chat_id, sender_id = %sender.id, "Private message sent");
    Ok(chat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Missing;
    use crate::testing::shared_state;

    fn user(state: &SharedState, id: &str) -> User {
        lock(state).unwrap().repository.get_user(&UserId::from(id)).unwrap()
    }

    #[tokio::test]
    async fn get_or_create_is_order_independent() {
        let state = shared_state();
        let mut rx = crate::state::subscribe_events(&state).unwrap();
        let a = user(&state, "prof2");
        let b = user(&state, "stud2");

        let ab = get_or_create_chat(&state, &a, &b).await.unwrap();
        let ba = get_or_create_chat(&state, &b, &a).await.unwrap();
        // Only the creation is announced.
        assert!(matches!(rx.try_recv(), Ok(AppEvent::ChatUpdated(c)) if c.id == ab.id));
        assert!(rx.try_recv().is_err());
        assert_eq!(ab.id, ba.id);
        assert!(ab.messages.is_empty());
        assert_eq!(list_chats_for(&state, &a.id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn existing_seed_chat_is_reused() {
        let state = shared_state();
        let chat = get_or_create_chat(&state, &user(&state, "stud1"), &user(&state, "prof1"))
            .await
            .unwrap();
        assert_eq!(chat.id, ChatId::from("pc1"));
        assert_eq!(chat.messages.len(), 2);
    }

    #[tokio::test]
    async fn chat_with_self_is_rejected() {
        let state = shared_state();
        let a = user(&state, "stud1");
        assert!(matches!(
            get_or_create_chat(&state, &a, &a).await,
            Err(CommandError::InvalidInput(_))
        ));
    }

    #[test]
    fn conversations_resolve_peer_names() {
        let state = shared_state();
        let convs = conversations_for(&state, &UserId::from("stud1")).unwrap();
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].peer_id, UserId::from("prof1"));
        assert_eq!(convs[0].peer_name, user(&state, "prof1").name);
    }

    #[tokio::test]
    async fn send_appends_and_unknown_chat_is_not_found() {
        let state = shared_state();
        let sender = user(&state, "stud1");

        let chat = send_private_message(&state, &ChatId::from("pc1"), &sender, "merci")
            .await
            .unwrap();
        assert_eq!(chat.messages.len(), 3);
        assert_eq!(chat.messages.last().unwrap().sender_id, sender.id);
        assert_eq!(get_chat(&state, &chat.id).unwrap(), chat);

        let err = send_private_message(&state, &ChatId::from("nope"), &sender, "merci")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(Missing::Chat(_))));
    }

    #[tokio::test]
    async fn outsider_cannot_post_into_chat() {
        let state = shared_state();
        let outsider = user(&state, "stud3");
        let err = send_private_message(&state, &ChatId::from("pc1"), &outsider, "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::AccessDenied(_)));
    }
}
