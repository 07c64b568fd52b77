//! Domain types and rules for the room desk.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on these types.

pub mod equipment;
pub mod error;
pub mod room;
pub mod types;
