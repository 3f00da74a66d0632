pub mod events;
pub mod state;

pub use events::{Event, Flow};
pub use state::App;
