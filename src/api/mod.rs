pub mod models;
pub mod subsonic;
pub mod transport;

pub use models::*;
pub use subsonic::*;
