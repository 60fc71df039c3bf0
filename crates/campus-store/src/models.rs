//! Domain model structs held by the registry.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be persisted
//! as JSON and handed to the UI layer unchanged.  Field names follow the
//! camelCase shape of the persisted session record.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_shared::types::{ChannelId, ChatId, ContentId, ContentKind, Language, MessageId, Role, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A professor or student account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Unique across both roles.
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub profile_pic: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    /// Professor reputation.  Only meaningful for professors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u32>,
    /// Student wallet in DZD.  Only meaningful for students.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<u64>,
    /// Push-notification device token, once registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
}

impl User {
    pub fn is_professor(&self) -> bool {
        self.role == Role::Professor
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    /// Fill in the role-specific counters a record may be missing, e.g. one
    /// persisted by an older build.  Returns `true` if anything changed.
    pub fn backfill_defaults(&mut self) -> bool {
        match self.role {
            Role::Professor if self.stars.is_none() => {
                self.stars = Some(0);
                true
            }
            Role::Student if self.balance.is_none() => {
                self.balance = Some(0);
                true
            }
            _ => false,
        }
    }

    pub fn stars(&self) -> u32 {
        self.stars.unwrap_or(0)
    }

    pub fn balance(&self) -> u64 {
        self.balance.unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// A published file attached to a channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ContentId,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// URL or data URI of the file.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Content to publish; the registry assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub url: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// A professor-owned space scoped to one specialization.
///
/// `professor_name` is copied at creation time; renaming the professor later
/// does not rewrite it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: ChannelId,
    /// Specialization name.
    pub name: String,
    pub professor_id: UserId,
    pub professor_name: String,
    pub university: String,
    pub college: String,
    pub content: Vec<ContentItem>,
    pub chat_messages: Vec<Message>,
    pub google_meet_link: String,
    pub subscribers: BTreeSet<UserId>,
}

impl Channel {
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.professor_id == user_id
    }

    pub fn is_subscriber(&self, user_id: &UserId) -> bool {
        self.subscribers.contains(user_id)
    }

    /// Owner or subscriber.
    pub fn can_access(&self, user: &User) -> bool {
        (user.is_professor() && self.is_owner(&user.id)) || self.is_subscriber(&user.id)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A chat message, in a channel or a private chat.  Immutable once created;
/// the sender name is copied at send time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: &User, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            sender_id: sender.id.clone(),
            sender_name: sender.name.clone(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Private chat
// ---------------------------------------------------------------------------

/// A two-party conversation.  At most one exists per unordered pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrivateChat {
    pub id: ChatId,
    pub participants: [UserId; 2],
    pub messages: Vec<Message>,
}

impl PrivateChat {
    pub fn involves(&self, user_id: &UserId) -> bool {
        self.participants.contains(user_id)
    }

    /// Order-independent pair match.
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        let [p0, p1] = &self.participants;
        (p0 == a && p1 == b) || (p0 == b && p1 == a)
    }

    /// The participant that is not `user_id`.
    pub fn peer_of(&self, user_id: &UserId) -> Option<&UserId> {
        let [p0, p1] = &self.participants;
        if p0 == user_id {
            Some(p1)
        } else if p1 == user_id {
            Some(p0)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Profile settings
// ---------------------------------------------------------------------------

/// Process-wide display preferences, not tied to a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub is_dark_mode: bool,
    pub language: Language,
}
