//! Client for the Join kanban board.
//!
//! Repositories keep an in-memory copy of one store collection and reload it
//! after each write, so their views always reflect the store.

pub mod board;
pub mod contacts;
pub mod store;
pub mod tasks;
pub mod users;
pub mod view;

use join_api::v1::ValidationError;
use thiserror::Error;

pub use board::{Board, Column, Summary};
pub use contacts::ContactRepository;
pub use store::{MemoryStore, Store, StoreClient, StoreError};
pub use tasks::TaskRepository;
pub use users::{greeting, ColorPool, Session, UserRepository};
pub use view::{Avatar, ContactGroup, Directory, Progress, TaskCard};

pub const DEFAULT_STORE_URL: &str = "http://127.0.0.1:7890/api/v1/";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::Json(err))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
