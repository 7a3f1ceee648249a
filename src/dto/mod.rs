mod requests;
mod responses;

pub use requests::{CreatePostForm, LoginRequest, SignupRequest, TagsInput, UpdatePostRequest};
pub use responses::{AuthResponse, AuthorRef, MessageResponse, PostResponse, UserResponse};
