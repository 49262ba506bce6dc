pub mod api;
pub mod blueprint;
pub mod errors;
pub mod layout;
pub mod plan;
pub mod preview;
pub mod scaffold;
pub mod utils;

pub use api::{generate, HinagataError, RunOptions};
pub use blueprint::Blueprint;
