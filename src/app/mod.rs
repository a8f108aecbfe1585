//! TUI application module
//!
//! Contains the terminal user interface components, screen management,
//! and application state handling.

pub mod app;
pub mod controller;
pub mod screens;
pub mod state;
pub mod ticker;
pub mod tui;
pub mod view;

pub use app::App;
pub use controller::Controller;
pub use screens::{QuizScreen, ResultAction, ResultsScreen, StartScreen};
pub use state::{AppState, NavigationAction, StateManager};
pub use ticker::Ticker;
pub use tui::Tui;
pub use view::TuiView;
