//! Application services - orchestration over the domain and ports.

mod post;

pub use post::{NewPost, PostChanges, PostService, UpdateMode};
