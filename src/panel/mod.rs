pub mod controller;
pub mod keyboard;
pub mod preview;
pub mod render;
pub mod runtime;
pub mod state;

pub use controller::*;
pub use keyboard::*;
pub use preview::*;
pub use render::*;
pub use runtime::*;
pub use state::*;
