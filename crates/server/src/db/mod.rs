//! Repositories over the key-value [`Store`](crate::store::Store).
//!
//! Each repository borrows the store and groups the reads and writes for
//! one entity family. Handlers stay thin: parse, call a repository,
//! respond.

pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod orders;
pub mod users;

pub use cart::CartRepository;
pub use catalog::CatalogRepository;
pub use favorites::FavoritesRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;
