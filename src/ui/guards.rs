//! Route authorization guards
//!
//! `PrivateRoute` and `AdminRoute` wrap protected route content. Both defer
//! to a shared decision function, so the routing policy is a pure function
//! of the auth snapshot and the requested path, re-evaluated on every
//! navigation. While the session is still resolving they render a neutral
//! placeholder: protected content must never flash before the check
//! settles, and no redirect may fire from an unresolved state.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::core::auth::Role;
use crate::ui::auth::use_auth_context;
use crate::ui::common::LoadingSpinner;

/// Role requirement attached to a guarded route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated identity.
    Authenticated,
    /// Administrators only.
    Admin,
}

/// Outcome of evaluating a guard for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Authentication unresolved: show a placeholder, decide nothing.
    Loading,
    /// Render the requested content.
    Render,
    /// Send the visitor to another route.
    Redirect(String),
}

/// Paths that only make sense for students; administrators get bounced to
/// their own dashboard instead.
const STUDENT_ONLY_PATHS: &[&str] = &["/dashboard"];

/// Decide what a guarded route renders.
///
/// `role` is `None` for an unauthenticated visitor; an authenticated user
/// always has one.
pub fn route_decision(
    is_loading: bool,
    role: Option<Role>,
    access: Access,
    path: &str,
) -> RouteDecision {
    if is_loading {
        return RouteDecision::Loading;
    }
    let Some(role) = role else {
        return RouteDecision::Redirect(login_with_return(path));
    };
    match access {
        Access::Authenticated => {
            if role.is_admin() && STUDENT_ONLY_PATHS.contains(&path) {
                RouteDecision::Redirect("/admin".to_string())
            } else {
                RouteDecision::Render
            }
        }
        Access::Admin => {
            if role.is_admin() {
                RouteDecision::Render
            } else {
                RouteDecision::Redirect("/dashboard".to_string())
            }
        }
    }
}

/// Login route carrying the originally-requested location, so a successful
/// login can return the visitor where they were headed.
fn login_with_return(path: &str) -> String {
    if path.is_empty() || path == "/" {
        "/login".to_string()
    } else {
        format!("/login?redirect={}", escape_query_value(path))
    }
}

/// Percent-escape the separators a path can smuggle into a query value.
fn escape_query_value(path: &str) -> String {
    path.replace('%', "%25")
        .replace('&', "%26")
        .replace('?', "%3F")
        .replace('#', "%23")
}

/// Where to send a user right after login.
///
/// Honors the `redirect` query parameter when it names an in-app absolute
/// path; anything else (missing, external, scheme-relative) falls back to
/// the role's own dashboard.
pub fn post_login_destination(requested: Option<&str>, role: Role) -> String {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => role.home_path().to_string(),
    }
}

/// Route guard requiring any authenticated identity.
#[component]
pub fn PrivateRoute(children: ChildrenFn) -> impl IntoView {
    guarded_view(Access::Authenticated, children)
}

/// Route guard requiring the admin role.
#[component]
pub fn AdminRoute(children: ChildrenFn) -> impl IntoView {
    guarded_view(Access::Admin, children)
}

fn guarded_view(access: Access, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth_context();
    let location = use_location();

    move || {
        let path = location.pathname.get();
        match route_decision(auth.is_loading(), auth.role(), access, &path) {
            RouteDecision::Loading => view! {
                <div class="min-h-screen flex items-center justify-center">
                    <LoadingSpinner message="Checking your session...".to_string() />
                </div>
            }
            .into_any(),
            RouteDecision::Render => children(),
            RouteDecision::Redirect(to) => view! { <Redirect path=to /> }.into_any(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_always_defers_regardless_of_other_inputs() {
        for access in [Access::Authenticated, Access::Admin] {
            for role in [None, Some(Role::Student), Some(Role::Admin)] {
                for path in ["/dashboard", "/admin", "/anything"] {
                    assert_eq!(
                        route_decision(true, role, access, path),
                        RouteDecision::Loading,
                        "loading must mask role={role:?} access={access:?} path={path}"
                    );
                }
            }
        }
    }

    #[test]
    fn unauthenticated_visitors_are_sent_to_login_with_return_path() {
        assert_eq!(
            route_decision(false, None, Access::Authenticated, "/dashboard"),
            RouteDecision::Redirect("/login?redirect=/dashboard".to_string())
        );
        assert_eq!(
            route_decision(false, None, Access::Admin, "/admin"),
            RouteDecision::Redirect("/login?redirect=/admin".to_string())
        );
    }

    #[test]
    fn students_render_private_content() {
        assert_eq!(
            route_decision(false, Some(Role::Student), Access::Authenticated, "/dashboard"),
            RouteDecision::Render
        );
    }

    #[test]
    fn admins_are_bounced_off_student_only_paths() {
        assert_eq!(
            route_decision(false, Some(Role::Admin), Access::Authenticated, "/dashboard"),
            RouteDecision::Redirect("/admin".to_string())
        );
        // Other private paths render normally for admins.
        assert_eq!(
            route_decision(false, Some(Role::Admin), Access::Authenticated, "/chat"),
            RouteDecision::Render
        );
    }

    #[test]
    fn non_admins_are_bounced_off_admin_paths() {
        assert_eq!(
            route_decision(false, Some(Role::Student), Access::Admin, "/admin"),
            RouteDecision::Redirect("/dashboard".to_string())
        );
    }

    #[test]
    fn admins_render_admin_content() {
        assert_eq!(
            route_decision(false, Some(Role::Admin), Access::Admin, "/admin"),
            RouteDecision::Render
        );
    }

    #[test]
    fn return_path_escapes_query_separators() {
        assert_eq!(
            route_decision(false, None, Access::Authenticated, "/rooms?floor=2&wing=b"),
            RouteDecision::Redirect(
                "/login?redirect=/rooms%3Ffloor=2%26wing=b".to_string()
            )
        );
    }

    #[test]
    fn bare_root_gets_no_return_parameter() {
        assert_eq!(
            route_decision(false, None, Access::Authenticated, "/"),
            RouteDecision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn post_login_returns_to_the_requested_path() {
        assert_eq!(
            post_login_destination(Some("/admin"), Role::Admin),
            "/admin"
        );
        assert_eq!(
            post_login_destination(Some("/chat"), Role::Student),
            "/chat"
        );
    }

    #[test]
    fn post_login_falls_back_to_the_role_dashboard() {
        assert_eq!(post_login_destination(None, Role::Student), "/dashboard");
        assert_eq!(post_login_destination(None, Role::Admin), "/admin");
        // Anything that is not an in-app absolute path is ignored.
        assert_eq!(
            post_login_destination(Some("https://evil.test"), Role::Student),
            "/dashboard"
        );
        assert_eq!(
            post_login_destination(Some("//evil.test"), Role::Admin),
            "/admin"
        );
    }
}
