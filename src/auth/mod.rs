//! Authentication
//!
//! Login/signup/logout, the page guard and the forgot-password flow.

mod controller;
mod guard;
mod password_reset;

pub use controller::{AuthController, AuthState};
pub use guard::{resolve_route, Route};
pub use password_reset::{PasswordResetFlow, PasswordResetSession, ResetStep};
