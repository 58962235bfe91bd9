//! Domain entities - posts, comments and the people behind them.

mod caller;
mod comment;
mod post;
mod user;

pub mod validation;

pub use caller::{Caller, Principal};
pub use comment::{COMMENT_AUTHOR_MAX_CHARS, Comment};
pub use post::{Post, TITLE_MAX_CHARS};
pub use user::{User, normalize_email};
