mod post;
mod user;

pub use post::{NewPost, Post, split_tags};
pub use user::User;
