//! Subscription workflow: add a student to a channel and reward the owning
//! professor.

use tracing::{info, warn};

use campus_shared::constants::{SUBSCRIPTION_PRICE_DZD, SUBSCRIPTION_STAR_REWARD};
use campus_shared::types::{ChannelId, UserId};
use campus_store::{Channel, User};

use super::auth::{read_session, write_session};
use super::simulate_latency;
use crate::config::PaymentMode;
use crate::error::CommandError;
use crate::events::{emit_event, AppEvent};
use crate::state::{lock, SharedState};

/// Subscribe `student_id` to `channel_id`.
///
/// Idempotent: an existing subscriber is neither added twice nor charged,
/// and the professor is credited [`SUBSCRIPTION_STAR_REWARD`] stars only on
/// the first call.  When the active session belongs to the professor or the
/// student whose record changes, the session copy is rewritten as well.
///
/// Every check runs before anything is written, and the session is written
/// before the registry, so a failure leaves both untouched.
pub async fn subscribe(
    state: &SharedState,
    channel_id: &ChannelId,
    student_id: &UserId,
) -> Result<Channel, CommandError> {
    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;

    let channel = st.repository.get_channel(channel_id)?;
    let student = st.repository.get_user(student_id)?;
    if !student.is_student() {
        return Err(CommandError::AccessDenied(format!(
            "{student_id} is not a student"
        )));
    }
    if channel.is_subscriber(student_id) {
        info!(channel_id = %channel_id, student_id = %student_id, "Already subscribed");
        return Ok(channel);
    }

    let new_balance = match st.config.payment_mode {
        PaymentMode::Cosmetic => None,
        PaymentMode::Debit => {
            let balance = student.balance();
            let remaining = balance
                .checked_sub(SUBSCRIPTION_PRICE_DZD)
                .ok_or(CommandError::InsufficientFunds {
                    balance,
                    price: SUBSCRIPTION_PRICE_DZD,
                })?;
            Some(remaining)
        }
    };

    let professor = st.repository.get_user(&channel.professor_id).ok();
    if professor.is_none() {
        warn!(channel_id = %channel_id, "Channel owner missing, no stars credited");
    }

    let refreshed = match read_session(st.storage.as_ref()) {
        Some(session) if session.id == student.id => new_balance.map(|balance| User {
            balance: Some(balance),
            ..student.clone()
        }),
        Some(session) => professor
            .as_ref()
            .filter(|p| p.id == session.id)
            .map(|p| User {
                stars: Some(p.stars().saturating_add(SUBSCRIPTION_STAR_REWARD)),
                ..p.clone()
            }),
        None => None,
    };
    if let Some(user) = &refreshed {
        write_session(st.storage.as_mut(), user)?;
    }

    if let Some(balance) = new_balance {
        st.repository.set_balance(student_id, balance)?;
        info!(student_id = %student_id, balance, "Subscription debited");
    }
    let (channel, _) = st.repository.add_subscriber(channel_id, student_id)?;
    if let Some(professor) = &professor {
        let professor = st
            .repository
            .credit_stars(&professor.id, SUBSCRIPTION_STAR_REWARD)?;
        info!(
            professor_id = %professor.id,
            stars = professor.stars(),
            "Professor credited"
        );
    }

    if let Some(user) = refreshed {
        emit_event(&st.events, AppEvent::SessionChanged(Some(user)));
    }
    emit_event(&st.events, AppEvent::ChannelUpdated(channel.clone()));

    info!(channel_id = %channel_id, student_id = %student_id, "Subscribed");
    Ok(channel)
}
