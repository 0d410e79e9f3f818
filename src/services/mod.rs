// Service exports
pub mod auth;
pub mod memory;
pub mod postgres;
pub mod store;

pub use auth::{AuthError, Claims, PasswordHasher, TokenService};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use store::{FriendRepository, GameProfileRepository, LfgRepository, Store, StoreError, UserRepository};
