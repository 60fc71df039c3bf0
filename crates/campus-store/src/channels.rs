//! CRUD operations for [`Channel`] records and their content, chat and
//! subscriber lists.

use std::collections::BTreeSet;

use campus_shared::constants::PLACEHOLDER_MEET_LINK;
use campus_shared::types::{ChannelId, ContentId, UserId};

use crate::error::{Result, StoreError};
use crate::models::{Channel, ContentItem, Message, NewContent};
use crate::registry::Registry;

impl Registry {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Create an empty channel owned by `professor_id`.
    ///
    /// The professor's current name is copied onto the channel.
    pub fn create_channel(
        &mut self,
        professor_id: &UserId,
        name: &str,
        university: &str,
        college: &str,
    ) -> Result<Channel> {
        let professor = self
            .users
            .iter()
            .find(|u| &u.id == professor_id && u.is_professor())
            .ok_or_else(|| StoreError::UserNotFound(professor_id.clone()))?;

        let channel = Channel {
            id: ChannelId::generate(),
            name: name.to_string(),
            professor_id: professor.id.clone(),
            professor_name: professor.name.clone(),
            university: university.to_string(),
            college: college.to_string(),
            content: Vec::new(),
            chat_messages: Vec::new(),
            google_meet_link: PLACEHOLDER_MEET_LINK.to_string(),
            subscribers: BTreeSet::new(),
        };

        self.channels.push(channel.clone());
        Ok(channel)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn get_channel(&self, id: &ChannelId) -> Result<Channel> {
        self.channels
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ChannelNotFound(id.clone()))
    }

    /// Channels matching every supplied filter, in creation order.
    pub fn list_channels(&self, university: Option<&str>, college: Option<&str>) -> Vec<Channel> {
        self.channels
            .iter()
            .filter(|c| university.map_or(true, |u| c.university == u))
            .filter(|c| college.map_or(true, |k| c.college == k))
            .cloned()
            .collect()
    }

    pub fn list_channels_owned_by(&self, professor_id: &UserId) -> Vec<Channel> {
        self.channels
            .iter()
            .filter(|c| &c.professor_id == professor_id)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Append content under a fresh id and return the updated channel.
    pub fn publish_content(&mut self, id: &ChannelId, content: NewContent) -> Result<Channel> {
        let channel = self.channel_mut(id)?;
        channel.content.push(ContentItem {
            id: ContentId::generate(),
            kind: content.kind,
            url: content.url,
            file_name: content.file_name,
            thumbnail: content.thumbnail,
        });
        Ok(channel.clone())
    }

    /// Append a chat message and return the updated channel.
    pub fn append_channel_message(&mut self, id: &ChannelId, message: Message) -> Result<Channel> {
        let channel = self.channel_mut(id)?;
        channel.chat_messages.push(message);
        Ok(channel.clone())
    }

    /// Add a subscriber.  The flag is `false` when the user was already
    /// subscribed, in which case the channel is unchanged.
    pub fn add_subscriber(&mut self, id: &ChannelId, user_id: &UserId) -> Result<(Channel, bool)> {
        let channel = self.channel_mut(id)?;
        let added = channel.subscribers.insert(user_id.clone());
        Ok((channel.clone(), added))
    }

    fn channel_mut(&mut self, id: &ChannelId) -> Result<&mut Channel> {
        self.channels
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::ChannelNotFound(id.clone()))
    }
}
