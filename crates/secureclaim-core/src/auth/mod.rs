//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `Session` / `SessionState`: the authenticated identity and the
//!   `Loading` / `Unauthenticated` / `Authenticated` state machine
//! - `SessionManager`: sign-in, sign-up, sign-out, and start-up restore
//! - `SessionStore`: durable key-value storage for the persisted session,
//!   with file, keyring, and in-memory backends
//!
//! The session is persisted under a single key and survives restarts until
//! the user signs out.

pub mod credentials;
pub mod manager;
pub mod session;
pub mod storage;

pub use credentials::KeyringStore;
pub use manager::{SessionManager, SESSION_KEY};
pub use session::{Session, SessionState};
pub use storage::{FileStore, MemoryStore, SessionStore, StorageError};
