//! Authentication UI module
//!
//! Context wiring and form components for the sign-in, registration, and
//! email verification flows.

mod context;
mod login_form;
mod register_form;
mod user_menu;
mod verify_form;

pub use context::{provide_auth_context, use_auth_context, AuthContext};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
pub use user_menu::UserMenu;
pub use verify_form::VerifyEmailForm;
