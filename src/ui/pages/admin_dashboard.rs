//! Admin dashboard page component
//!
//! Guarded by `AdminRoute`. Entry point for the management views: rooms,
//! schedules, and user approval live behind this page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::{use_auth_context, UserMenu};
use crate::ui::icon::{icons, Icon};

/// Admin dashboard page component
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
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

            // Main content
            <main class="flex-1 max-w-7xl w-full mx-auto px-4 sm:px-6 lg:px-8 py-8">
                {move || {
                    auth.current_user().map(|user| {
                        view! {
                            <div>
                                <div class="flex items-center gap-3 mb-1">
                                    <Icon name=icons::SHIELD class="w-6 h-6" />
                                    <h1 class="text-2xl font-bold text-theme-primary">
                                        "Administration"
                                    </h1>
                                </div>
                                <p class="text-sm text-theme-secondary mb-6">
                                    {format!("Signed in as {} ({})", user.name, user.email)}
                                </p>

                                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                                    <div class="p-6 bg-theme-secondary border border-theme rounded-xl">
                                        <h2 class="text-lg font-semibold text-theme-primary mb-2">"Rooms"</h2>
                                        <p class="text-sm text-theme-secondary">
                                            "Room inventory and availability management."
                                        </p>
                                    </div>
                                    <div class="p-6 bg-theme-secondary border border-theme rounded-xl">
                                        <h2 class="text-lg font-semibold text-theme-primary mb-2">"Schedules"</h2>
                                        <p class="text-sm text-theme-secondary">
                                            "Class schedules and room assignments."
                                        </p>
                                    </div>
                                    <div class="p-6 bg-theme-secondary border border-theme rounded-xl">
                                        <h2 class="text-lg font-semibold text-theme-primary mb-2">"Users"</h2>
                                        <p class="text-sm text-theme-secondary">
                                            "Account approval and role management."
                                        </p>
                                    </div>
                                </div>
                            </div>
                        }
                    })
                }}
            </main>
        </div>
    }
}
