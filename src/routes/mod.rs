pub mod api_docs;
pub mod health_check;
pub mod movies;

pub use api_docs::*;
pub use health_check::*;
pub use movies::*;
