//! TinyYummy client core: session storage, token inspection and route guards

pub mod error;
pub mod guard;
pub mod session;
pub mod storage;
pub mod token;

pub use error::{CoreError, CoreResult};
pub use guard::{AdminGuard, FORBIDDEN_ROUTE, Guard, GuardDecision, LOGIN_ROUTE, UserOnlyGuard};
pub use session::{Role, Session, SessionSnapshot, StorageKey};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageArea, TokenStore};
pub use token::{TokenClaims, decode_claims, is_expired, is_expired_at};
