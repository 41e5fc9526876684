//! Generic structures with no particular tie to the rest of the library.

pub mod stamp;
