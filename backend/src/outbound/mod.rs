//! Outbound adapters implementing domain ports for storage.
//!
//! - **memory**: process-local repository seeded with demo data.
//! - **persistence**: PostgreSQL-backed repository using Diesel ORM.
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no validation logic.

pub mod memory;
pub mod persistence;
