//! Screen state machine.
//!
//! `Splash -> {Welcome | Shell}`, `Welcome <-> Auth`, and inside the shell
//! every screen is reached from the dashboard and returns to it with
//! [`ViewController::back`].  Logout goes back to `Welcome`.
//!
//! Every navigation bumps a generation counter.  Async work started on one
//! screen captures a [`Ticket`]; its result is applied through one of the
//! `apply_*` methods, which drop it when the ticket is stale.

use tracing::debug;

use campus_shared::types::{ChannelId, Role};
use campus_store::{Channel, NewContent, User};

use crate::commands::auth::{self, Registration};
use crate::commands::{channels, subscription};
use crate::error::CommandError;
use crate::state::{lock, SharedState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Which dashboard the shell shows, decided by the session role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardVariant {
    Professor,
    Student,
}

impl From<Role> for DashboardVariant {
    fn from(role: Role) -> Self {
        match role {
            Role::Professor => Self::Professor,
            Role::Student => Self::Student,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelAccess {
    Granted(Channel),
    /// The channel exists but the user is neither its owner nor subscribed.
    Denied(Channel),
}

impl ChannelAccess {
    fn resolve(channel: Channel, user: &User) -> Self {
        if channel.can_access(user) {
            Self::Granted(channel)
        } else {
            Self::Denied(channel)
        }
    }

    pub fn channel(&self) -> &Channel {
        match self {
            Self::Granted(c) | Self::Denied(c) => c,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellScreen {
    Dashboard,
    ChannelDetail(ChannelAccess),
    ProfileSettings,
    PrivateChats,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Splash,
    Welcome,
    Auth(AuthMode),
    Shell { user: User, screen: ShellScreen },
}

/// Generation captured when async work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

pub struct ViewController {
    state: SharedState,
    view: View,
    generation: u64,
}

impl ViewController {
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            view: View::Splash,
            generation: 0,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.view {
            View::Shell { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn dashboard_variant(&self) -> Option<DashboardVariant> {
        self.user().map(|u| u.role.into())
    }

    pub fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        if ticket.0 == self.generation {
            true
        } else {
            debug!(stale = ticket.0, current = self.generation, "Discarding stale result");
            false
        }
    }

    fn navigate(&mut self, view: View) {
        self.generation += 1;
        self.view = view;
    }

    fn set_screen(&mut self, screen: ShellScreen) -> bool {
        let View::Shell { user, .. } = &self.view else {
            return false;
        };
        let user = user.clone();
        self.navigate(View::Shell { user, screen });
        true
    }

    fn require_user(&self) -> Result<User, CommandError> {
        self.user()
            .cloned()
            .ok_or_else(|| CommandError::AccessDenied("not logged in".into()))
    }

    // ----- Splash / unauthenticated -----

    /// Hold the splash for the configured duration, then restore the session.
    pub async fn boot(&mut self) -> Result<(), CommandError> {
        if self.view != View::Splash {
            return Ok(());
        }
        let ticket = self.ticket();
        let splash = lock(&self.state)?.config.splash;
        tokio::time::sleep(splash).await;
        let session = auth::current_user(&self.state)?;
        self.apply_boot(ticket, session);
        Ok(())
    }

    pub fn apply_boot(&mut self, ticket: Ticket, session: Option<User>) {
        if !self.is_current(ticket) {
            return;
        }
        match session {
            Some(user) => self.navigate(View::Shell {
                user,
                screen: ShellScreen::Dashboard,
            }),
            None => self.navigate(View::Welcome),
        }
    }

    pub fn show_login(&mut self) -> bool {
        self.show_auth(AuthMode::Login)
    }

    pub fn show_register(&mut self) -> bool {
        self.show_auth(AuthMode::Register)
    }

    fn show_auth(&mut self, mode: AuthMode) -> bool {
        match self.view {
            View::Welcome | View::Auth(_) => {
                self.navigate(View::Auth(mode));
                true
            }
            _ => false,
        }
    }

    pub async fn submit_login(&mut self, email: &str, role: Role) -> Result<(), CommandError> {
        let ticket = self.ticket();
        let result = auth::login(&self.state, email, role).await;
        self.apply_session(ticket, result)
    }

    pub async fn submit_register(&mut self, form: Registration) -> Result<(), CommandError> {
        let ticket = self.ticket();
        let result = auth::register(&self.state, form).await;
        self.apply_session(ticket, result)
    }

    pub async fn demo_login(&mut self, role: Role) -> Result<(), CommandError> {
        let ticket = self.ticket();
        let result = auth::demo_login(&self.state, role).await;
        self.apply_session(ticket, result)
    }

    /// Enter the shell with a freshly authenticated user.  Errors are
    /// returned for inline display and leave the view unchanged.
    ///
    /// A result on a stale ticket is dropped, error or not.
    pub fn apply_session(&mut self, ticket: Ticket, result: Result<User, CommandError>) -> Result<(), CommandError> {
        if !self.is_current(ticket) {
            return Ok(());
        }
        self.navigate(View::Shell {
            user: result?,
            screen: ShellScreen::Dashboard,
        });
        Ok(())
    }

    // ----- Shell -----

    /// Open a channel, guarded by owner-or-subscriber access.
    pub fn open_channel(&mut self, channel_id: &ChannelId) -> Result<bool, CommandError> {
        let user = self.require_user()?;
        let channel = channels::get_channel(&self.state, channel_id)?;
        let access = ChannelAccess::resolve(channel, &user);
        let granted = access.is_granted();
        self.set_screen(ShellScreen::ChannelDetail(access));
        Ok(granted)
    }

    pub fn open_profile_settings(&mut self) -> bool {
        self.set_screen(ShellScreen::ProfileSettings)
    }

    pub fn open_private_chats(&mut self) -> bool {
        self.set_screen(ShellScreen::PrivateChats)
    }

    pub fn open_assistant(&mut self) -> bool {
        self.set_screen(ShellScreen::Assistant)
    }

    /// Return to the dashboard, or to the welcome screen from login/register.
    pub fn back(&mut self) -> bool {
        match &self.view {
            View::Auth(_) => {
                self.navigate(View::Welcome);
                true
            }
            View::Shell { screen, .. } if *screen != ShellScreen::Dashboard => {
                self.set_screen(ShellScreen::Dashboard)
            }
            _ => false,
        }
    }

    pub async fn logout(&mut self) -> Result<(), CommandError> {
        auth::logout(&self.state).await?;
        self.navigate(View::Welcome);
        Ok(())
    }

    /// Subscribe the session student to `channel_id`.
    pub async fn subscribe(&mut self, channel_id: &ChannelId) -> Result<(), CommandError> {
        let user = self.require_user()?;
        if !user.is_student() {
            return Err(CommandError::AccessDenied("only students subscribe".into()));
        }
        let ticket = self.ticket();
        let result = subscription::subscribe(&self.state, channel_id, &user.id).await;
        self.apply_channel(ticket, result)
    }

    /// Post to the open channel.
    pub async fn send_channel_message(&mut self, text: &str) -> Result<(), CommandError> {
        let (user, channel_id) = self.open_channel_context()?;
        let ticket = self.ticket();
        let result = channels::send_channel_message(&self.state, &channel_id, &user, text).await;
        self.apply_channel(ticket, result)
    }

    /// Publish into the open channel.
    pub async fn publish_content(&mut self, content: NewContent) -> Result<(), CommandError> {
        let (user, channel_id) = self.open_channel_context()?;
        let ticket = self.ticket();
        let result = channels::publish_content(&self.state, &channel_id, &user, content).await;
        self.apply_channel(ticket, result)
    }

    fn open_channel_context(&self) -> Result<(User, ChannelId), CommandError> {
        match &self.view {
            View::Shell {
                user,
                screen: ShellScreen::ChannelDetail(access),
            } => Ok((user.clone(), access.channel().id.clone())),
            _ => Err(CommandError::InvalidInput("No channel is open".into())),
        }
    }

    /// Re-render after a channel mutation.  The session user is re-read
    /// first since the mutation may have changed stars or balance.
    pub fn apply_channel(&mut self, ticket: Ticket, result: Result<Channel, CommandError>) -> Result<(), CommandError> {
        if !self.is_current(ticket) {
            return Ok(());
        }
        let channel = result?;
        self.refresh_session()?;
        if let View::Shell { user, screen } = &mut self.view {
            if let ShellScreen::ChannelDetail(access) = screen {
                if access.channel().id == channel.id {
                    *access = ChannelAccess::resolve(channel, user);
                }
            }
        }
        Ok(())
    }

    /// Pick up session changes made by commands without navigating.
    pub fn refresh_session(&mut self) -> Result<(), CommandError> {
        let session = auth::current_user(&self.state)?;
        let View::Shell { user, .. } = &mut self.view else {
            return Ok(());
        };
        match session {
            Some(fresh) if fresh.id == user.id => *user = fresh,
            _ => self.navigate(View::Welcome),
        }
        Ok(())
    }
}
