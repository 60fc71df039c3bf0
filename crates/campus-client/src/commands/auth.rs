//! Session store: login, registration, logout, current-user lookup and
//! profile updates.
//!
//! The session is the JSON-serialised [`User`] under [`SESSION_KEY`].  Every
//! mutating command writes it through; the registry entry with the same id
//! is kept in step according to the configured [`UpdatePolicy`].

use tracing::{info, warn};

use campus_shared::constants::{DEMO_PROFESSOR_EMAIL, DEMO_STUDENT_EMAIL, SESSION_KEY};
use campus_shared::directory;
use campus_shared::types::{Role, UserId};
use campus_store::kv::{load_json, save_json};
use campus_store::{KeyValueStore, User};

use super::simulate_latency;
use crate::config::UpdatePolicy;
use crate::error::CommandError;
use crate::events::{emit_event, AppEvent};
use crate::state::{lock, SharedState};

/// Registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub university: Option<String>,
    pub college: Option<String>,
}

/// Read the persisted session, back-filling role-specific counters.
///
/// A corrupt record is treated as no session.
pub(crate) fn read_session(storage: &dyn KeyValueStore) -> Option<User> {
    match load_json::<User>(storage, SESSION_KEY) {
        Ok(Some(mut user)) => {
            user.backfill_defaults();
            Some(user)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable session record");
            None
        }
    }
}

pub(crate) fn write_session(storage: &mut dyn KeyValueStore, user: &User) -> Result<(), CommandError> {
    save_json(storage, SESSION_KEY, user)?;
    Ok(())
}

pub async fn login(state: &SharedState, email: &str, role: Role) -> Result<User, CommandError> {
    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;

    let mut user = st
        .repository
        .find_user_by_login(email.trim(), role)
        .ok_or(CommandError::AuthFailure)?;
    user.backfill_defaults();

    write_session(st.storage.as_mut(), &user)?;
    emit_event(&st.events, AppEvent::SessionChanged(Some(user.clone())));

    info!(user_id = %user.id, role = %role, "Logged in");
    Ok(user)
}

/// Log in as the seeded demo account of `role`.
pub async fn demo_login(state: &SharedState, role: Role) -> Result<User, CommandError> {
    let email = match role {
        Role::Student => DEMO_STUDENT_EMAIL,
        Role::Professor => DEMO_PROFESSOR_EMAIL,
    };
    login(state, email, role).await
}

pub async fn register(state: &SharedState, form: Registration) -> Result<User, CommandError> {
    let email = form.email.trim().to_string();
    let name = form.name.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return Err(CommandError::InvalidInput("A valid email is required".into()));
    }
    if name.is_empty() {
        return Err(CommandError::InvalidInput("A name is required".into()));
    }
    if let (Some(u), Some(c)) = (&form.university, &form.college) {
        if !directory::is_valid_affiliation(u, c) {
            return Err(CommandError::InvalidInput(format!("Unknown affiliation: {u} / {c}")));
        }
    }

    simulate_latency(state).await?;

    let id = UserId::generate();
    let user = User {
        profile_pic: format!("https://picsum.photos/100/100?random={}", id.as_str()),
        id,
        email,
        name,
        role: form.role,
        university: form.university,
        college: form.college,
        stars: (form.role == Role::Professor).then_some(0),
        balance: (form.role == Role::Student).then_some(0),
        device_token: None,
    };

    let mut guard = lock(state)?;
    let st = &mut *guard;

    let user = st.repository.insert_user(user)?;
    write_session(st.storage.as_mut(), &user)?;
    emit_event(&st.events, AppEvent::SessionChanged(Some(user.clone())));

    info!(user_id = %user.id, role = %user.role, "Registered");
    Ok(user)
}

/// Clear the persisted session.  The registry is untouched.
pub async fn logout(state: &SharedState) -> Result<(), CommandError> {
    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;
    st.storage.remove(SESSION_KEY)?;
    emit_event(&st.events, AppEvent::SessionChanged(None));

    info!("Logged out");
    Ok(())
}

pub fn current_user(state: &SharedState) -> Result<Option<User>, CommandError> {
    let guard = lock(state)?;
    Ok(read_session(guard.storage.as_ref()))
}

/// Replace the registry entry sharing `updated.id` and persist `updated` as
/// the session.
///
/// With [`UpdatePolicy::Strict`] an unknown id fails with `NotFound` and
/// nothing is written; with [`UpdatePolicy::Upsert`] the record is inserted.
pub async fn update_user(state: &SharedState, updated: User) -> Result<User, CommandError> {
    simulate_latency(state).await?;

    let mut guard = lock(state)?;
    let st = &mut *guard;
    let user = apply_user_update(st.repository.as_mut(), st.config.update_policy, updated)?;

    write_session(st.storage.as_mut(), &user)?;
    emit_event(&st.events, AppEvent::SessionChanged(Some(user.clone())));

    info!(user_id = %user.id, "Profile updated");
    Ok(user)
}

pub(crate) fn apply_user_update(
    repository: &mut dyn campus_store::Repository,
    policy: UpdatePolicy,
    mut updated: User,
) -> Result<User, CommandError> {
    updated.backfill_defaults();
    match policy {
        UpdatePolicy::Strict => Ok(repository.replace_user(updated)?),
        UpdatePolicy::Upsert => Ok(repository.upsert_user(updated)?),
    }
}

/// Change the current user's display name and picture.
pub async fn update_profile(
    state: &SharedState,
    name: &str,
    profile_pic: Option<String>,
) -> Result<User, CommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::InvalidInput("A name is required".into()));
    }

    let mut user = current_user(state)?
        .ok_or_else(|| CommandError::AccessDenied("not logged in".into()))?;
    user.name = name.to_string();
    if let Some(pic) = profile_pic {
        user.profile_pic = pic;
    }
    update_user(state, user).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::Missing;
    use crate::testing::{shared_state, shared_state_with};

    fn sara() -> Registration {
        Registration {
            email: "sara@x.dz".into(),
            name: "Sara".into(),
            role: Role::Student,
            university: None,
            college: None,
        }
    }

    #[tokio::test]
    async fn register_then_login_with_matching_role_only() {
        let state = shared_state();
        let registered = register(&state, sara()).await.unwrap();
        assert_eq!(registered.balance, Some(0));
        assert_eq!(registered.stars, None);

        let again = login(&state, "sara@x.dz", Role::Student).await.unwrap();
        assert_eq!(again.id, registered.id);

        let err = login(&state, "sara@x.dz", Role::Professor).await.unwrap_err();
        assert!(matches!(err, CommandError::AuthFailure));
    }

    #[tokio::test]
    async fn duplicate_email_in_either_role_is_rejected() {
        let state = shared_state();
        let before = lock(&state).unwrap().repository.list_users(None).len();

        let mut form = sara();
        form.email = "prof1@example.com".into();
        let err = register(&state, form).await.unwrap_err();
        assert!(matches!(err, CommandError::DuplicateEmail(_)));

        let after = lock(&state).unwrap().repository.list_users(None).len();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn register_professor_starts_with_zero_stars_and_is_session() {
        let state = shared_state();
        let mut form = sara();
        form.email = "p@x.dz".into();
        form.role = Role::Professor;
        let prof = register(&state, form).await.unwrap();
        assert_eq!(prof.stars, Some(0));
        assert_eq!(current_user(&state).unwrap(), Some(prof));
    }

    #[tokio::test]
    async fn register_rejects_unknown_affiliation() {
        let state = shared_state();
        let mut form = sara();
        form.university = Some("nowhere".into());
        form.college = Some("none".into());
        assert!(matches!(
            register(&state, form).await,
            Err(CommandError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn logout_clears_session_but_not_registry() {
        let state = shared_state();
        let user = login(&state, "stud1@example.com", Role::Student).await.unwrap();
        logout(&state).await.unwrap();
        assert_eq!(current_user(&state).unwrap(), None);
        assert!(lock(&state).unwrap().repository.get_user(&user.id).is_ok());
    }

    #[tokio::test]
    async fn demo_login_uses_seeded_accounts() {
        let state = shared_state();
        let stud = demo_login(&state, Role::Student).await.unwrap();
        assert_eq!(stud.email, DEMO_STUDENT_EMAIL);
        let prof = demo_login(&state, Role::Professor).await.unwrap();
        assert_eq!(prof.email, DEMO_PROFESSOR_EMAIL);
    }

    #[tokio::test]
    async fn update_then_current_user_round_trips() {
        let state = shared_state();
        let mut user = login(&state, "stud1@example.com", Role::Student).await.unwrap();
        user.name = "Sara K.".into();
        user.device_token = Some("tok".into());

        update_user(&state, user.clone()).await.unwrap();
        assert_eq!(current_user(&state).unwrap(), Some(user.clone()));
        assert_eq!(lock(&state).unwrap().repository.get_user(&user.id).unwrap(), user);
    }

    #[tokio::test]
    async fn current_user_backfills_old_session_shape() {
        let state = shared_state();
        {
            let mut guard = lock(&state).unwrap();
            guard
                .storage
                .set(SESSION_KEY, r#"{"id":"prof1","email":"prof1@example.com","name":"A","role":"professor"}"#)
                .unwrap();
        }
        let user = current_user(&state).unwrap().unwrap();
        assert_eq!(user.stars, Some(0));
    }

    #[tokio::test]
    async fn corrupt_session_reads_as_logged_out() {
        let state = shared_state();
        lock(&state).unwrap().storage.set(SESSION_KEY, "{oops").unwrap();
        assert_eq!(current_user(&state).unwrap(), None);
    }

    #[tokio::test]
    async fn strict_policy_rejects_unknown_user() {
        let config = ClientConfig {
            update_policy: UpdatePolicy::Strict,
            ..ClientConfig::default()
        };
        let state = shared_state_with(config);

        let mut ghost = login(&state, "stud1@example.com", Role::Student).await.unwrap();
        ghost.id = UserId::from("ghost");
        let err = update_user(&state, ghost).await.unwrap_err();
        assert!(matches!(err, CommandError::NotFound(Missing::User(_))));
        assert_eq!(current_user(&state).unwrap().unwrap().id, UserId::from("stud1"));
    }

    #[tokio::test]
    async fn upsert_policy_keeps_registry_and_session_in_step() {
        let state = shared_state();
        let mut ghost = login(&state, "stud1@example.com", Role::Student).await.unwrap();
        ghost.id = UserId::from("ghost");
        ghost.email = "ghost@x.dz".into();

        update_user(&state, ghost.clone()).await.unwrap();
        assert_eq!(lock(&state).unwrap().repository.get_user(&ghost.id).unwrap(), ghost);
        assert_eq!(current_user(&state).unwrap(), Some(ghost));
    }

    #[tokio::test]
    async fn update_cannot_take_another_accounts_email() {
        let state = shared_state();
        let mut user = login(&state, "stud1@example.com", Role::Student).await.unwrap();
        let original = user.clone();
        user.email = "stud2@example.com".into();

        let err = update_user(&state, user).await.unwrap_err();
        assert!(matches!(err, CommandError::DuplicateEmail(e) if e == "stud2@example.com"));
        assert_eq!(current_user(&state).unwrap(), Some(original.clone()));
        assert_eq!(lock(&state).unwrap().repository.get_user(&original.id).unwrap(), original);

        let other = login(&state, "stud2@example.com", Role::Student).await.unwrap();
        assert_eq!(other.id, UserId::from("stud2"));
    }

    #[tokio::test]
    async fn upsert_of_unknown_id_with_taken_email_is_rejected() {
        let state = shared_state();
        let mut ghost = login(&state, "stud1@example.com", Role::Student).await.unwrap();
        ghost.id = UserId::from("ghost");

        let err = update_user(&state, ghost).await.unwrap_err();
        assert!(matches!(err, CommandError::DuplicateEmail(_)));
        let holders = lock(&state)
            .unwrap()
            .repository
            .list_users(None)
            .into_iter()
            .filter(|u| u.email == "stud1@example.com")
            .count();
        assert_eq!(holders, 1);
    }

    #[tokio::test]
    async fn update_profile_changes_name_and_picture() {
        let state = shared_state();
        login(&state, "stud2@example.com", Role::Student).await.unwrap();
        let user = update_profile(&state, "  Amine  ", Some("data:image/png;base64,AA".into()))
            .await
            .unwrap();
        assert_eq!(user.name, "Amine");
        assert_eq!(user.profile_pic, "data:image/png;base64,AA");

        assert!(matches!(
            update_profile(&state, " ", None).await,
            Err(CommandError::InvalidInput(_))
        ));
    }
}
