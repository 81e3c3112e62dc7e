//! Email verification form component
//!
//! Entry for the six-digit code sent after registration. A correct code
//! activates the account; the visitor then signs in normally.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;
use crate::ui::icon::{icons, Icon};

/// Email verification form component
#[component]
pub fn VerifyEmailForm(
    /// Callback when verification succeeded
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let code = RwSignal::new(String::new());
    let code_error = RwSignal::new(None::<String>);

    let validate_code = move || {
        let value = code.get();
        if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
            code_error.set(Some("Enter the 6-digit code from your email".to_string()));
            false
        } else {
            code_error.set(None);
            true
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        auth.clear_error();

        if !validate_code() {
            return;
        }

        let code_val = code.get();

        spawn_local(async move {
            if auth.verify_email(&code_val).await.is_ok() {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-6">
                // Header
                <div class="text-center">
                    <div class="w-12 h-12 mx-auto mb-3 bg-theme-secondary rounded-full flex items-center justify-center">
                        <Icon name=icons::MAIL class="w-6 h-6" />
                    </div>
                    <h2 class="text-2xl font-bold text-theme-primary">
                        "Verify Your Email"
                    </h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        "Enter the code we sent to your email address"
                    </p>
                </div>

                // Global error message
                {move || {
                    auth.error.get().map(|error| {
                        view! {
                            <div class="p-3 bg-red-100 dark:bg-red-900/30 border border-red-300 dark:border-red-700 rounded-lg">
                                <p class="text-sm text-red-700 dark:text-red-300">{error}</p>
                            </div>
                        }
                    })
                }}

                // Code field
                <div>
                    <label for="otp" class="block text-sm font-medium text-theme-primary mb-1">
                        "Verification Code"
                    </label>
                    <input
                        type="text"
                        id="otp"
                        name="otp"
                        inputmode="numeric"
                        autocomplete="one-time-code"
                        maxlength="6"
                        placeholder="Enter 6-digit code"
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg
                               text-theme-primary placeholder-theme-tertiary text-center text-lg tracking-widest
                               focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                               transition-colors"
                        class:border-red-500=move || code_error.get().is_some()
                        prop:value=move || code.get()
                        on:input=move |ev| {
                            code.set(event_target_value(&ev));
                            code_error.set(None);
                        }
                    />
                    {move || {
                        code_error.get().map(|error| {
                            view! {
                                <p class="mt-1 text-sm text-red-500">{error}</p>
                            }
                        })
                    }}
                    <p class="mt-2 text-sm text-theme-tertiary text-center">
                        "The code is valid for 10 minutes"
                    </p>
                </div>

                // Submit button
                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary hover:bg-accent-primary-hover
                           text-white font-medium rounded-lg
                           focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-accent-primary
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                    disabled=move || auth.is_loading()
                >
                    {move || {
                        if auth.is_loading() {
                            view! {
                                <span class="flex items-center justify-center">
                                    <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4 text-white" />
                                    "Verifying..."
                                </span>
                            }.into_any()
                        } else {
                            view! { <span class="block">"Verify Email"</span> }.into_any()
                        }
                    }}
                </button>
            </form>
        </div>
    }
}
