//! Domain entities - the core business objects.

mod block;
mod post;

pub use block::{Block, ContentBlock};
pub use post::Post;
