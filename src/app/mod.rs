pub mod state;
pub mod ui;
pub mod views;

pub use state::{App, AppWrapper, DetailView, Loadable, MenuState, Route, Session};
