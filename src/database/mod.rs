pub mod provider;
pub mod store;

pub use provider::{classify, DatabaseProvider};
pub use store::{StoreError, Todo, TodoStore};
