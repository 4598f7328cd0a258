pub mod app;
mod bridge;
pub mod event_loop;
pub mod state;
pub mod theme;
pub mod view;


pub use app::TuiApp;
