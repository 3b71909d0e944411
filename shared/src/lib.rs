pub mod error;
pub mod models;
pub mod validation;

pub use error::{ErrorKind, ErrorResponse};
pub use models::*;
pub use validation::*;
