//! CRUD operations for [`PrivateChat`] records.

use campus_shared::types::{ChatId, UserId};

use crate::error::{Result, StoreError};
use crate::models::{Message, PrivateChat};
use crate::registry::Registry;

impl Registry {
    /// All chats `user_id` takes part in.
    pub fn list_chats_for(&self, user_id: &UserId) -> Vec<PrivateChat> {
        self.chats
            .iter()
            .filter(|c| c.involves(user_id))
            .cloned()
            .collect()
    }

    pub fn get_chat(&self, id: &ChatId) -> Result<PrivateChat> {
        self.chats
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ChatNotFound(id.clone()))
    }

    /// Look up the chat between `a` and `b` in either order, creating an
    /// empty one when none exists.  The flag is `true` when the chat was
    /// created by this call.
    pub fn get_or_create_chat(&mut self, a: &UserId, b: &UserId) -> (PrivateChat, bool) {
        if let Some(chat) = self.chats.iter().find(|c| c.is_between(a, b)) {
            return (chat.clone(), false);
        }

        let chat = PrivateChat {
            id: ChatId::generate(),
            participants: [a.clone(), b.clone()],
            messages: Vec::new(),
        };
        tracing::debug!(chat_id = %chat.id, a = %a, b = %b, "private chat created");
        self.chats.push(chat.clone());
        (chat, true)
    }

    /// Append a message and return the updated chat.
    pub fn append_chat_message(&mut self, id: &ChatId, message: Message) -> Result<PrivateChat> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::ChatNotFound(id.clone()))?;
        chat.messages.push(message);
        Ok(chat.clone())
    }
}

#[cfg(test)]
mod tests {
    use campus_shared::types::Role;

    use super::*;
    use crate::models::User;

    fn sender(id: &str) -> User {
        User {
            id: UserId::from(id),
            email: format!("{id}@x.dz"),
            name: id.to_uppercase(),
            profile_pic: String::new(),
            role: Role::Student,
            university: None,
            college: None,
            stars: None,
            balance: Some(0),
            device_token: None,
        }
    }

    #[test]
    fn get_or_create_is_order_independent() {
        let mut reg = Registry::new();
        let a = UserId::from("a");
        let b = UserId::from("b");

        let (ab, created) = reg.get_or_create_chat(&a, &b);
        assert!(created);
        let (ba, created) = reg.get_or_create_chat(&b, &a);
        assert!(!created);
        assert_eq!(ab.id, ba.id);
        assert_eq!(reg.chat_count(), 1);
    }

    #[test]
    fn messages_append_in_order() {
        let mut reg = Registry::new();
        let a = sender("a");
        let b = sender("b");
        let (chat, _) = reg.get_or_create_chat(&a.id, &b.id);

        reg.append_chat_message(&chat.id, Message::new(&a, "one")).unwrap();
        let updated = reg.append_chat_message(&chat.id, Message::new(&b, "two")).unwrap();
        let texts: Vec<_> = updated.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
        assert_eq!(updated.messages[1].sender_name, "B");
    }

    #[test]
    fn list_and_unknown_chat() {
        let mut reg = Registry::new();
        let a = UserId::from("a");
        reg.get_or_create_chat(&a, &UserId::from("b"));
        reg.get_or_create_chat(&UserId::from("c"), &UserId::from("d"));

        assert_eq!(reg.list_chats_for(&a).len(), 1);
        assert!(reg.list_chats_for(&UserId::from("z")).is_empty());
        assert!(matches!(
            reg.append_chat_message(&ChatId::from("nope"), Message::new(&sender("a"), "x")),
            Err(StoreError::ChatNotFound(_))
        ));
    }
}
