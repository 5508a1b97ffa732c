//! Token storage abstractions.
//!
//! The persistence layer owns users and their remember tokens. This crate only
//! looks users up by token and asks the store to rotate a token on sign-out.
//! Implement [`TokenStore`] over your own database.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`Rememberable`] | A user that carries a remember token |
//! | [`AuthUser`] | Ready-made user record |
//! | [`TokenStore`] | Lookup by token and token rotation |
//! | [`InMemoryTokenStore`] | In-memory store for development and tests |

mod memory_store;
mod token;
mod user;

pub use memory_store::InMemoryTokenStore;
pub use token::TokenStore;
pub use user::{AuthUser, Rememberable};
