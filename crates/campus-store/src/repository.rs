//! The data-access interface the client layer is written against.
//!
//! [`Registry`] is the production implementation; tests may substitute their
//! own.  All methods are synchronous and run to completion under the
//! caller's lock, so a multi-step workflow built from them is atomic.

use campus_shared::types::{ChannelId, ChatId, Role, UserId};

use crate::error::Result;
use crate::models::{Channel, Message, NewContent, PrivateChat, User};
use crate::registry::Registry;

pub trait Repository: Send {
    // users
    fn get_user(&self, id: &UserId) -> Result<User>;
    fn find_user_by_login(&self, email: &str, role: Role) -> Option<User>;
    fn list_users(&self, role: Option<Role>) -> Vec<User>;
    fn insert_user(&mut self, user: User) -> Result<User>;
    fn replace_user(&mut self, user: User) -> Result<User>;
    fn upsert_user(&mut self, user: User) -> Result<User>;
    fn credit_stars(&mut self, id: &UserId, amount: u32) -> Result<User>;
    fn set_balance(&mut self, id: &UserId, balance: u64) -> Result<User>;

    // channels
    fn get_channel(&self, id: &ChannelId) -> Result<Channel>;
    fn list_channels(&self, university: Option<&str>, college: Option<&str>) -> Vec<Channel>;
    fn list_channels_owned_by(&self, professor_id: &UserId) -> Vec<Channel>;
    fn create_channel(
        &mut self,
        professor_id: &UserId,
        name: &str,
        university: &str,
        college: &str,
    ) -> Result<Channel>;
    fn publish_content(&mut self, id: &ChannelId, content: NewContent) -> Result<Channel>;
    fn append_channel_message(&mut self, id: &ChannelId, message: Message) -> Result<Channel>;
    fn add_subscriber(&mut self, id: &ChannelId, user_id: &UserId) -> Result<(Channel, bool)>;

    // private chats
    fn get_chat(&self, id: &ChatId) -> Result<PrivateChat>;
    fn list_chats_for(&self, user_id: &UserId) -> Vec<PrivateChat>;
    fn get_or_create_chat(&mut self, a: &UserId, b: &UserId) -> (PrivateChat, bool);
    fn append_chat_message(&mut self, id: &ChatId, message: Message) -> Result<PrivateChat>;
}

impl Repository for Registry {
    fn get_user(&self, id: &UserId) -> Result<User> {
        Registry::get_user(self, id)
    }

    fn find_user_by_login(&self, email: &str, role: Role) -> Option<User> {
        Registry::find_user_by_login(self, email, role)
    }

    fn list_users(&self, role: Option<Role>) -> Vec<User> {
        Registry::list_users(self, role)
    }

    fn insert_user(&mut self, user: User) -> Result<User> {
        Registry::insert_user(self, user)
    }

    fn replace_user(&mut self, user: User) -> Result<User> {
        Registry::replace_user(self, user)
    }

    fn upsert_user(&mut self, user: User) -> Result<User> {
        Registry::upsert_user(self, user)
    }

    fn credit_stars(&mut self, id: &UserId, amount: u32) -> Result<User> {
        Registry::credit_stars(self, id, amount)
    }

    fn set_balance(&mut self, id: &UserId, balance: u64) -> Result<User> {
        Registry::set_balance(self, id, balance)
    }

    fn get_channel(&self, id: &ChannelId) -> Result<Channel> {
        Registry::get_channel(self, id)
    }

    fn list_channels(&self, university: Option<&str>, college: Option<&str>) -> Vec<Channel> {
        Registry::list_channels(self, university, college)
    }

    fn list_channels_owned_by(&self, professor_id: &UserId) -> Vec<Channel> {
        Registry::list_channels_owned_by(self, professor_id)
    }

    fn create_channel(
        &mut self,
        professor_id: &UserId,
        name: &str,
        university: &str,
        college: &str,
    ) -> Result<Channel> {
        Registry::create_channel(self, professor_id, name, university, college)
    }

    fn publish_content(&mut self, id: &ChannelId, content: NewContent) -> Result<Channel> {
        Registry::publish_content(self, id, content)
    }

    fn append_channel_message(&mut self, id: &ChannelId, message: Message) -> Result<Channel> {
        Registry::append_channel_message(self, id, message)
    }

    fn add_subscriber(&mut self, id: &ChannelId, user_id: &UserId) -> Result<(Channel, bool)> {
        Registry::add_subscriber(self, id, user_id)
    }

    fn get_chat(&self, id: &ChatId) -> Result<PrivateChat> {
        Registry::get_chat(self, id)
    }

    fn list_chats_for(&self, user_id: &UserId) -> Vec<PrivateChat> {
        Registry::list_chats_for(self, user_id)
    }

    fn get_or_create_chat(&mut self, a: &UserId, b: &UserId) -> (PrivateChat, bool) {
        Registry::get_or_create_chat(self, a, b)
    }

    fn append_chat_message(&mut self, id: &ChatId, message: Message) -> Result<PrivateChat> {
        Registry::append_chat_message(self, id, message)
    }
}
