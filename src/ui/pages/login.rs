//! Login page component
//!
//! Redirects an already-authenticated visitor by role. After a successful
//! sign-in the redirect fires from the auth state change, not from the call
//! itself, and honors the return path a guard attached before sending the
//! visitor here.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::ui::auth::{use_auth_context, LoginForm};
use crate::ui::guards::post_login_destination;
use crate::ui::icon::{icons, Icon};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let query = use_query_map();

    // Redirect once the user state lands
    Effect::new(move |_| {
        if let Some(user) = auth.current_user() {
            let navigate = use_navigate();
            let requested = query.get().get("redirect");
            navigate(
                &post_login_destination(requested.as_deref(), user.role),
                Default::default(),
            );
        }
    });

    // Switch to register page
    let on_register_click = move |_| {
        let navigate = use_navigate();
        navigate("/register", Default::default());
    };

    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            // Header
            <header class="border-b border-theme">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex items-center h-16">
                        <A href="/" attr:class="flex items-center gap-3 hover:opacity-80 transition-opacity">
                            <Icon name=icons::SCHOOL class="w-8 h-8" />
                            <span class="text-xl font-bold text-theme-primary">"ClassTrack"</span>
                        </A>
                    </div>
                </div>
            </header>

            // Main content
            <main class="flex-1 flex items-center justify-center p-4">
                <div class="w-full max-w-md">
                    <LoginForm on_register_click=Callback::new(on_register_click) />
                </div>
            </main>

            // Footer
            <footer class="py-4 border-t border-theme">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <p class="text-center text-sm text-theme-tertiary">
                        "© 2025 ClassTrack. All rights reserved."
                    </p>
                </div>
            </footer>
        </div>
    }
}
