//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: in-memory repositories guarded by async read/write locks
//! - **security**: bcrypt password hashing and HS256 JWT access tokens
//!
//! Adapters translate between domain types and their storage or wire form and
//! contain no business logic.

pub mod persistence;
pub mod security;
