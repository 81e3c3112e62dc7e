use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::auth::{RemoteIdentityProvider, SessionManager};
use crate::ui::auth::provide_auth_context;
use crate::ui::guards::{AdminRoute, PrivateRoute};
use crate::ui::notifications::{provide_notifications, NotificationsContainer};
use crate::ui::pages::{
    AdminDashboardPage, LandingPage, LoginPage, NotFoundPage, RegisterPage,
    StudentDashboardPage, VerifyEmailPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let notifications = provide_notifications();

    // One session manager for the whole client session; views and guards
    // reach it through the injected auth context.
    let manager = Rc::new(SessionManager::new(RemoteIdentityProvider::default()));
    let _auth = provide_auth_context(manager);

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/classtrack.css"/>

        // sets the document title
        <Title text="ClassTrack - Classroom Booking"/>

        <NotificationsContainer notifications=notifications.notifications() />

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/") view=LandingPage/>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/register") view=RegisterPage/>
                <Route path=path!("/verify-email") view=VerifyEmailPage/>

                // Student routes
                <Route path=path!("/dashboard") view=|| view! {
                    <PrivateRoute>
                        <StudentDashboardPage/>
                    </PrivateRoute>
                }/>

                // Admin routes
                <Route path=path!("/admin") view=|| view! {
                    <AdminRoute>
                        <AdminDashboardPage/>
                    </AdminRoute>
                }/>
            </Routes>
        </Router>
    }
}
