//! Data models for the campus dashboard

mod user;
mod announcement;
mod event;
mod poll;
mod feedback;
mod settings;

pub use user::*;
pub use announcement::*;
pub use event::*;
pub use poll::*;
pub use feedback::*;
pub use settings::*;
