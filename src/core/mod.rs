//! Core domain state and backend integration for the ClassTrack client

pub mod auth;
#[cfg(feature = "ssr")]
pub mod config;
pub mod notification;

pub use notification::{Notification, NotificationKind};
