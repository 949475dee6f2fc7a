pub mod controller;
pub mod detail;
pub mod notifications;
pub mod search;
pub mod timers;

pub use controller::{App, AppHandle, Command, Timing, ViewState};
pub use detail::{DetailStatus, DetailView};
pub use notifications::Notification;
pub use search::SearchState;
