//! UI components and pages for the ClassTrack client

pub mod auth;
pub mod common;
pub mod guards;
pub mod icon;
pub mod notifications;
pub mod pages;

pub use guards::{AdminRoute, PrivateRoute};
pub use notifications::{NotificationManager, NotificationsContainer};
