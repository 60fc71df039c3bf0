//! Push-notification registration boundary.
//!
//! The platform messaging SDK is opaque to the client: it can ask for
//! permission and hand back a device token.  Writing the token onto the
//! user record is done by `commands::notifications`.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The platform has no notification support at all.
    Unsupported,
}

#[derive(Debug, Error)]
pub enum PushError {
    #[error("Token request failed: {0}")]
    Token(String),
}

#[async_trait]
pub trait PushRegistrar: Send + Sync {
    async fn request_permission(&self) -> Permission;

    /// `Ok(None)` when the platform has no token to give yet.
    async fn device_token(&self) -> Result<Option<String>, PushError>;
}

/// Registrar for platforms without push support.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRegistrar;

#[async_trait]
impl PushRegistrar for UnsupportedRegistrar {
    async fn request_permission(&self) -> Permission {
        Permission::Unsupported
    }

    async fn device_token(&self) -> Result<Option<String>, PushError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_platform_has_no_token() {
        let registrar = UnsupportedRegistrar;
        assert_eq!(registrar.request_permission().await, Permission::Unsupported);
        assert!(registrar.device_token().await.unwrap().is_none());
    }
}
