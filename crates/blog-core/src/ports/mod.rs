//! Ports - trait definitions for the store, the clock and authentication.
//! Infrastructure provides the implementations.

mod auth;
mod clock;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use repository::{
    BaseRepository, CommentRepository, PostChanges, PostRepository, UserRepository,
};
