//! Email verification page component
//!
//! Entry point for the code sent after registration; success routes back to
//! the login page.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::VerifyEmailForm;
use crate::ui::icon::{icons, Icon};

/// Email verification page component
#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let on_success = move |_| {
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
                    <VerifyEmailForm on_success=Callback::new(on_success) />
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
