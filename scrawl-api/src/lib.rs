mod article;
pub use article::{Article, ArticleView, Comment};

mod claim;
pub use claim::IdentityClaim;

mod comment;
pub use comment::NewComment;

mod error;
pub use error::Error;

mod store;
pub use store::ArticleStore;
