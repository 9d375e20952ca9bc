//! Response contract for the movie lookup endpoint.
//!
//! [`MovieRecord`] and [`PosterRecord`] are the typed records handed out by a
//! lookup capability. [`MOVIE_SCHEMA`] and [`POSTER_SCHEMA`] describe the same
//! shapes as data, and every outgoing payload is checked against them before
//! it leaves the service.

mod contract;
mod records;

pub use contract::*;
pub use records::*;
