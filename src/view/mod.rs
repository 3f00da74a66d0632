pub mod render;
pub mod state;

pub use render::Screen;
pub use state::{compose, ViewState};
