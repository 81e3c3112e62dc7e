//! Student dashboard page component
//!
//! Guarded by `PrivateRoute`. Shows the signed-in identity and the spots
//! where bookings and schedules surface; the data views themselves are
//! separate concerns.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::{use_auth_context, UserMenu};
use crate::ui::icon::{icons, Icon};

/// Student dashboard page component
#[component]
pub fn StudentDashboardPage() -> impl IntoView {
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
                                <h1 class="text-2xl font-bold text-theme-primary mb-1">
                                    {format!("Welcome back, {}", user.name)}
                                </h1>
                                <p class="text-sm text-theme-secondary mb-6">{user.email.clone()}</p>

                                {(!user.approved).then(|| view! {
                                    <div class="flex items-start gap-3 p-4 mb-6 bg-yellow-500/10 border border-yellow-500/30 rounded-lg">
                                        <Icon name=icons::ALERT_CIRCLE class="w-5 h-5" />
                                        <p class="text-sm text-theme-secondary">
                                            "Your account is awaiting administrator approval. Some
                                             features may be unavailable until it is approved."
                                        </p>
                                    </div>
                                })}

                                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                    <div class="p-6 bg-theme-secondary border border-theme rounded-xl">
                                        <div class="flex items-center gap-3 mb-2">
                                            <Icon name=icons::CALENDAR class="w-5 h-5" />
                                            <h2 class="text-lg font-semibold text-theme-primary">"My Bookings"</h2>
                                        </div>
                                        <p class="text-sm text-theme-secondary">
                                            "Your upcoming room bookings will appear here."
                                        </p>
                                    </div>
                                    <div class="p-6 bg-theme-secondary border border-theme rounded-xl">
                                        <div class="flex items-center gap-3 mb-2">
                                            <Icon name=icons::CHECK class="w-5 h-5" />
                                            <h2 class="text-lg font-semibold text-theme-primary">"Today's Schedule"</h2>
                                        </div>
                                        <p class="text-sm text-theme-secondary">
                                            "Classes scheduled for today will appear here."
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
