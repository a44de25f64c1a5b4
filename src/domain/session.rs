//! Session context and the view-state machine.

use serde::{Deserialize, Serialize};

/// The authenticated business a request acts for.
///
/// Built by the auth middleware and handed to the link board explicitly;
/// nothing reads it from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub business_id: i64,
    pub slug: String,
    pub accent_color: String,
}

/// Named screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Landing,
    Login,
    Signup,
    Dashboard,
    Public,
}

/// Triggers that move the client between views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    Navigate(View),
    SignedIn,
    SignedOut,
}

impl View {
    /// Computes the next view.
    ///
    /// Dashboard and public preview require a session; without one the client
    /// lands on the login screen. Signed-in users skip login and signup.
    pub fn on(self, event: ViewEvent, signed_in: bool) -> View {
        match event {
            ViewEvent::SignedIn => View::Dashboard,
            ViewEvent::SignedOut => View::Landing,
            ViewEvent::Navigate(target) => match (target, signed_in) {
                (View::Dashboard | View::Public, false) => View::Login,
                (View::Login | View::Signup, true) => View::Dashboard,
                (target, _) => target,
            },
        }
    }
}
