mod link;

pub use link::Link;

pub(crate) use link::{decode_date, encode_date};
