use leptos::prelude::*;

#[component]
pub fn Icon(
    /// Icon name (without the .svg extension)
    name: &'static str,
    /// CSS classes for styling
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=name
            draggable=false
        />
    }
}

/// Predefined icon names for convenience
#[allow(dead_code)]
pub mod icons {
    pub const SCHOOL: &str = "school";
    pub const MAIL: &str = "mail";
    pub const EYE: &str = "eye";
    pub const EYE_CLOSED: &str = "eye-closed";
    pub const LOADER: &str = "loader";
    pub const USER: &str = "user";
    pub const LOGOUT: &str = "logout";
    pub const CHEVRON_DOWN: &str = "chevron-down";
    pub const CALENDAR: &str = "calendar";
    pub const SHIELD: &str = "shield";
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const CHECK: &str = "check";
}
