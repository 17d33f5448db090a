//! Explicit session context.
//!
//! Sessions are issued by the external identity provider. The core never
//! signs anyone in; it only needs to know who the viewer is and which bearer
//! token to attach. A `Session` is handed to the remote client and the
//! interaction controller at construction time instead of being looked up
//! from global state.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretBox};

/// The signed-in viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Stable identifier used to key per-viewer interaction state
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Viewer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Viewer identity plus bearer token.
///
/// Cloning is cheap: the token is shared behind an `Arc` and never copied
/// out of its `SecretBox` except when building a request header.
#[derive(Clone, Default)]
pub struct Session {
    viewer: Option<Viewer>,
    token: Option<Arc<SecretBox<String>>>,
}

impl Session {
    /// A session with no viewer and no token.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(viewer: Viewer, token: impl Into<String>) -> Self {
        Self {
            viewer: Some(viewer),
            token: Some(Arc::new(SecretBox::new(Box::new(token.into())))),
        }
    }

    /// Build a session from whatever the caller has; a token without a viewer
    /// still authenticates requests but cannot own interaction state.
    pub fn from_parts(viewer: Option<Viewer>, token: Option<String>) -> Self {
        Self {
            viewer,
            token: token
                .filter(|t| !t.trim().is_empty())
                .map(|t| Arc::new(SecretBox::new(Box::new(t)))),
        }
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    /// True when there is both a viewer and a token.
    pub fn is_authenticated(&self) -> bool {
        self.viewer.is_some() && self.token.is_some()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("viewer", &self.viewer)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
