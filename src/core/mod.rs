//! Service surfaces around the decision stage

pub mod http;

pub use http::*;
