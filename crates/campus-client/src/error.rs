use campus_shared::constants::SUBSCRIPTION_PRICE_DZD;
use campus_shared::types::Language;
use campus_store::StoreError;
use thiserror::Error;

/// Which kind of record a lookup failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    User(String),
    Professor(String),
    Channel(String),
    Chat(String),
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Missing::User(id) => write!(f, "user {id}"),
            Missing::Professor(id) => write!(f, "professor {id}"),
            Missing::Channel(id) => write!(f, "channel {id}"),
            Missing::Chat(id) => write!(f, "private chat {id}"),
        }
    }
}

/// Errors returned by command handlers to the screen that invoked them.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No account matches this email and role")]
    AuthFailure,

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Not found: {0}")]
    NotFound(Missing),

    #[error("Insufficient funds: balance {balance} DZD, price {price} DZD")]
    InsufficientFunds { balance: u64, price: u64 },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error("Application state lock poisoned")]
    StatePoisoned,
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(id) => Self::NotFound(Missing::User(id.0)),
            StoreError::ChannelNotFound(id) => Self::NotFound(Missing::Channel(id.0)),
            StoreError::ChatNotFound(id) => Self::NotFound(Missing::Chat(id.0)),
            StoreError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            other => Self::Storage(other),
        }
    }
}

impl CommandError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Short inline message for the invoking screen.
    pub fn user_message(&self, language: Language) -> String {
        use Language::*;
        match (self, language) {
            (Self::AuthFailure, Ar) => "البريد الإلكتروني أو الدور غير صحيح.".into(),
            (Self::AuthFailure, En) => "Incorrect email or role.".into(),
            (Self::AuthFailure, Fr) => "E-mail ou rôle incorrect.".into(),
            (Self::DuplicateEmail(_), Ar) => "هذا البريد الإلكتروني مستخدم بالفعل.".into(),
            (Self::DuplicateEmail(_), En) => "This email is already registered.".into(),
            (Self::DuplicateEmail(_), Fr) => "Cet e-mail est déjà utilisé.".into(),
            (Self::NotFound(_), Ar) => "العنصر المطلوب غير موجود.".into(),
            (Self::NotFound(_), En) => "The requested item was not found.".into(),
            (Self::NotFound(_), Fr) => "L'élément demandé est introuvable.".into(),
            (Self::InsufficientFunds { .. }, Ar) => {
                format!("رصيدك غير كافٍ. سعر الاشتراك {SUBSCRIPTION_PRICE_DZD} دج.")
            }
            (Self::InsufficientFunds { .. }, En) => {
                format!("Insufficient balance. The subscription costs {SUBSCRIPTION_PRICE_DZD} DZD.")
            }
            (Self::InsufficientFunds { .. }, Fr) => {
                format!("Solde insuffisant. L'abonnement coûte {SUBSCRIPTION_PRICE_DZD} DZD.")
            }
            (Self::AccessDenied(_), Ar) => "ليس لديك صلاحية الوصول.".into(),
            (Self::AccessDenied(_), En) => "You do not have access.".into(),
            (Self::AccessDenied(_), Fr) => "Vous n'avez pas accès.".into(),
            (Self::InvalidInput(reason), _) => reason.clone(),
            (_, Ar) => "حدث خطأ. يرجى المحاولة مرة أخرى.".into(),
            (_, En) => "Something went wrong. Please try again.".into(),
            (_, Fr) => "Une erreur est survenue. Veuillez réessayer.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use campus_shared::types::ChannelId;

    use super::*;

    #[test]
    fn store_lookups_map_to_not_found() {
        let err: CommandError = StoreError::ChannelNotFound(ChannelId::from("x")).into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: channel x");
    }

    #[test]
    fn duplicate_email_keeps_its_kind() {
        let err: CommandError = StoreError::DuplicateEmail("a@x.dz".into()).into();
        assert!(matches!(err, CommandError::DuplicateEmail(e) if e == "a@x.dz"));
    }

    #[test]
    fn messages_are_localized() {
        let err = CommandError::AuthFailure;
        assert_eq!(err.user_message(Language::En), "Incorrect email or role.");
        assert_ne!(err.user_message(Language::Ar), err.user_message(Language::Fr));
    }
}
