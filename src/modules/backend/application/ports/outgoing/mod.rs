pub mod auth_gateway;
pub mod object_storage;
pub mod table_gateway;

pub use auth_gateway::{AccessToken, AuthGateway, AuthSession, AuthUser};
pub use object_storage::{ObjectStorage, StoredObject};
pub use table_gateway::{BackendError, Filter, Order, SelectQuery, TableGateway};
