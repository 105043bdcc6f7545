//! UI building blocks shared by the app panels

pub mod theme;
pub mod toasts;
