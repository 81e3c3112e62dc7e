//! Register page component
//!
//! A successful registration hands off to the verification page; the
//! account has no session until the emailed code is confirmed.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::{use_auth_context, RegisterForm};
use crate::ui::icon::{icons, Icon};

/// Register page component
#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth_context();

    // An authenticated visitor has nothing to register
    Effect::new(move |_| {
        if let Some(user) = auth.current_user() {
            let navigate = use_navigate();
            navigate(user.role.home_path(), Default::default());
        }
    });

    let on_success = move |_| {
        let navigate = use_navigate();
        navigate("/verify-email", Default::default());
    };

    let on_login_click = move |_| {
        let navigate = use_navigate();
        navigate("/login", Default::default());
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
                    <RegisterForm
                        on_success=Callback::new(on_success)
                        on_login_click=Callback::new(on_login_click)
                    />
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
