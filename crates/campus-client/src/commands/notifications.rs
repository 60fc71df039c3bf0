//! Push-notification device registration.

use tracing::{info, warn};

use campus_store::User;

use super::auth::{apply_user_update, current_user, read_session, write_session};
use crate::error::CommandError;
use crate::events::{emit_event, AppEvent};
use crate::push::{Permission, PushRegistrar};
use crate::state::{lock, SharedState};

/// Ask for notification permission and store the device token on the
/// current user.
///
/// Returns the refreshed user when a new token was written, `None` when
/// nobody is logged in, permission was not granted, no token was available,
/// or the token was already stored.  Registrar failures are logged, not
/// returned.
pub async fn register_device(
    state: &SharedState,
    registrar: &dyn PushRegistrar,
) -> Result<Option<User>, CommandError> {
    if current_user(state)?.is_none() {
        return Ok(None);
    }

    match registrar.request_permission().await {
        Permission::Granted => {}
        other => {
            info!(permission = ?other, "Notifications not enabled");
            return Ok(None);
        }
    }

    let token = match registrar.device_token().await {
        Ok(Some(token)) => token,
        Ok(None) => return Ok(None),
        Err(e) => {
            warn!(error = %e, "Could not obtain device token");
            return Ok(None);
        }
    };

    // Re-read under the lock: the session may have changed while awaiting.
    let mut guard = lock(state)?;
    let st = &mut *guard;
    let Some(mut user) = read_session(st.storage.as_ref()) else {
        return Ok(None);
    };
    if user.device_token.as_deref() == Some(token.as_str()) {
        return Ok(None);
    }

    user.device_token = Some(token);
    let user = apply_user_update(st.repository.as_mut(), st.config.update_policy, user)?;
    write_session(st.storage.as_mut(), &user)?;
    emit_event(&st.events, AppEvent::SessionChanged(Some(user.clone())));

    info!(user_id = %user.id, "Device registered for notifications");
    Ok(Some(user))
}
