//! BoothRent Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access contract and the in-memory document store
//! - auth: Auth gateway contract and the in-memory provider
//!
//! Everything here is single-threaded and cooperative: the store is meant to
//! run on the browser main thread (or a current-thread test runtime), so the
//! seams use `Rc` callbacks and `?Send` futures instead of locks.

pub mod auth;
pub mod domain;
pub mod repository;
