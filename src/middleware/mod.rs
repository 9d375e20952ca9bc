mod etag;

pub use etag::*;
