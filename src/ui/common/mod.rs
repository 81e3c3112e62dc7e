//! Shared presentational components

mod spinner;

pub use spinner::{LoadingSpinner, Spinner, SpinnerSize};
