pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::TextOracle;
pub use storage::ArticleStore;
pub use types::{
    ArticleRequest, ArticleResponse, GeneratedArticle, PersistedArticleRecord,
    MAX_SUGGESTED_TOPICS, REQUIRED_FIELDS_MESSAGE,
};

pub type Result<T> = std::result::Result<T, Error>;
