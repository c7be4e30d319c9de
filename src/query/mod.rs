//! Query translation: protocol query intents -> backend query calls.

pub mod errors;
pub mod expression;
pub mod options;
pub mod provider;
pub mod result;


pub use errors::QueryError;
pub use expression::ExpressionTranslator;
pub use options::{FilterInfo, KeyDescriptor, OrderByInfo, QueryType, SkipTokenInfo};
pub use provider::QueryProvider;
pub use result::QueryResult;
