pub const BUILD_TIME_PATH: &str = env!("CARGO_MANIFEST_DIR");

mod error;
pub use error::{ChallengeError, Result};
mod problem;
pub use problem::Problem;

pub mod smallest_circle;
pub use smallest_circle as c001;
