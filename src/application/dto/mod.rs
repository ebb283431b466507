//! Data transfer objects for the application layer.

mod reply;

pub use reply::Reply;
