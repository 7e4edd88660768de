mod id_set;
mod kv;
mod schema;
mod types;

pub use id_set::{PersistedIdSet, LIKED_IDS_KEY, READ_IDS_KEY};
pub use schema::Database;
pub use types::DatabaseError;
