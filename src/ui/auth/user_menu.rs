//! User menu component
//!
//! Header dropdown showing the current identity and the sign-out action.
//! Shows login/register links when not authenticated.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::auth::{AuthState, CurrentUser, Role};
use crate::ui::icon::{icons, Icon};

/// User menu component for the header
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();

    // Dropdown open state
    let menu_open = RwSignal::new(false);

    // Handle logout; the route guards take care of leaving protected pages
    let handle_logout = move |_| {
        menu_open.set(false);
        spawn_local(async move {
            auth.logout().await;
        });
    };

    view! {
        <div class="relative">
            {move || {
                match auth.auth_state() {
                    AuthState::Bootstrapping => {
                        // Loading skeleton
                        view! {
                            <div class="w-8 h-8 rounded-full bg-theme-secondary animate-pulse"></div>
                        }.into_any()
                    }
                    AuthState::Unauthenticated => {
                        view! {
                            <div class="flex items-center gap-2">
                                <A
                                    href="/login"
                                    attr:class="px-3 py-1.5 text-sm font-medium text-theme-secondary hover:text-theme-primary transition-colors"
                                >
                                    "Sign In"
                                </A>
                                <A
                                    href="/register"
                                    attr:class="px-3 py-1.5 text-sm font-medium text-white bg-accent-primary hover:bg-accent-primary-hover rounded-lg transition-colors"
                                >
                                    "Register"
                                </A>
                            </div>
                        }.into_any()
                    }
                    AuthState::Authenticated(user) => {
                        let home = user.role.home_path();
                        view! {
                            <div class="relative">
                                <button
                                    class="flex items-center gap-2 p-1 rounded-lg hover:bg-theme-secondary transition-colors"
                                    on:click=move |_| menu_open.update(|v| *v = !*v)
                                >
                                    <UserAvatar user=user.clone() size=32 />
                                    <span class="hidden sm:block text-sm font-medium text-theme-primary max-w-[120px] truncate">
                                        {user.name.clone()}
                                    </span>
                                    <div class="flex items-center justify-center h-4 w-4 text-theme-tertiary transition-transform duration-200" class=("rotate-180", move || menu_open.get())>
                                        <Icon name=icons::CHEVRON_DOWN class="h-4 w-4" />
                                    </div>
                                </button>

                                // Dropdown menu
                                {move || {
                                    if menu_open.get() {
                                        let user_clone = user.clone();
                                        let role_label = match user_clone.role {
                                            Role::Admin => "Administrator",
                                            Role::Student => "Student",
                                        };
                                        Some(view! {
                                            <div class="absolute right-0 mt-2 w-56 bg-theme-primary rounded-lg shadow-lg border border-theme py-1 z-50">
                                                // User info header
                                                <div class="px-4 py-3 border-b border-theme">
                                                    <p class="text-sm font-medium text-theme-primary truncate">
                                                        {user_clone.name.clone()}
                                                    </p>
                                                    <p class="text-xs text-theme-tertiary truncate">
                                                        {user_clone.email.clone()}
                                                    </p>
                                                    <span class="inline-block mt-1 px-2 py-0.5 text-xs rounded-full bg-theme-secondary text-theme-secondary">
                                                        {role_label}
                                                    </span>
                                                </div>

                                                // Menu items
                                                <div class="py-1">
                                                    <A
                                                        href=home
                                                        attr:class="w-full px-4 py-2 text-sm text-left text-theme-primary
                                                               hover:bg-theme-secondary transition-colors flex items-center gap-2"
                                                    >
                                                        <Icon name=icons::USER class="h-4 w-4" />
                                                        "Dashboard"
                                                    </A>
                                                </div>

                                                // Divider
                                                <div class="border-t border-theme my-1"></div>

                                                // Logout
                                                <div class="py-1">
                                                    <button
                                                        class="w-full px-4 py-2 text-sm text-left text-red-500
                                                               hover:bg-red-50 dark:hover:bg-red-900/20 transition-colors
                                                               flex items-center gap-2"
                                                        on:click=handle_logout
                                                    >
                                                        <Icon name=icons::LOGOUT class="h-4 w-4" />
                                                        "Sign Out"
                                                    </button>
                                                </div>
                                            </div>
                                        })
                                    } else {
                                        None
                                    }
                                }}
                            </div>
                        }.into_any()
                    }
                }
            }}
        </div>
    }
}

/// User avatar component
#[component]
pub fn UserAvatar(
    /// User data
    user: CurrentUser,
    /// Avatar size in pixels
    #[prop(default = 32)]
    size: u32,
) -> impl IntoView {
    let initials = user
        .name
        .chars()
        .next()
        .unwrap_or('?')
        .to_uppercase()
        .to_string();

    let size_style = format!(
        "width: {}px; height: {}px; min-width: {}px; min-height: {}px;",
        size, size, size, size
    );
    let font_size = if size >= 40 { "text-lg" } else { "text-sm" };

    // Generate a consistent color from the name
    let hash = user
        .name
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(b as u32));
    let colors = [
        "bg-blue-500",
        "bg-green-500",
        "bg-yellow-500",
        "bg-red-500",
        "bg-purple-500",
        "bg-pink-500",
        "bg-indigo-500",
        "bg-teal-500",
    ];
    let color = colors[(hash as usize) % colors.len()];

    view! {
        <div
            class=format!("{} rounded-full flex items-center justify-center text-white font-medium {}", color, font_size)
            style=size_style
        >
            {initials}
        </div>
    }
}
