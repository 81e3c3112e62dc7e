//! Landing page component
//!
//! Public home page; points an authenticated visitor at their dashboard.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::{use_auth_context, UserMenu};
use crate::ui::icon::{icons, Icon};

/// Landing page component
#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            // Header
            <header class="border-b border-theme">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex items-center justify-between h-16">
                        <A href="/" attr:class="flex items-center gap-3 hover:opacity-80 transition-opacity">
                            <Icon name=icons::SCHOOL class="w-8 h-8" />
                            <span class="text-xl font-bold text-theme-primary">"ClassTrack"</span>
                        </A>
                        <UserMenu />
                    </div>
                </div>
            </header>

            // Hero
            <main class="flex-1 flex items-center justify-center p-4">
                <div class="text-center max-w-xl">
                    <div class="w-20 h-20 mx-auto mb-6 bg-theme-secondary rounded-full flex items-center justify-center">
                        <Icon name=icons::CALENDAR class="w-10 h-10" />
                    </div>
                    <h1 class="text-4xl font-bold text-theme-primary mb-4">
                        "Classroom booking, without the spreadsheet"
                    </h1>
                    <p class="text-theme-secondary mb-8">
                        "Track rooms, schedules, and people in one place. Students see their
                         day at a glance; administrators keep everything running."
                    </p>
                    {move || {
                        match auth.current_user() {
                            Some(user) => view! {
                                <A
                                    href=user.role.home_path()
                                    attr:class="px-6 py-3 bg-accent-primary hover:bg-accent-primary-hover text-white font-medium rounded-lg transition-colors"
                                >
                                    "Go to Dashboard"
                                </A>
                            }.into_any(),
                            None => view! {
                                <div class="flex flex-col sm:flex-row items-center justify-center gap-4">
                                    <A
                                        href="/register"
                                        attr:class="px-6 py-3 bg-accent-primary hover:bg-accent-primary-hover text-white font-medium rounded-lg transition-colors"
                                    >
                                        "Get Started"
                                    </A>
                                    <A
                                        href="/login"
                                        attr:class="px-6 py-3 border border-theme text-theme-primary hover:bg-theme-secondary font-medium rounded-lg transition-colors"
                                    >
                                        "Sign In"
                                    </A>
                                </div>
                            }.into_any(),
                        }
                    }}
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
