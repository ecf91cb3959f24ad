//! Types used throughout the library, without a more specific home.

pub mod err;
