mod get_movie;
mod util;

pub use get_movie::*;
pub use util::*;
