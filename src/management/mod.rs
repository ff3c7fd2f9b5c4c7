mod auth;
mod catalog;
mod finder;
mod store;
mod view;

pub use auth::Clock;
pub use auth::SystemClock;
pub use auth::TOKEN_EXPIRY_KEY;
pub use auth::TOKEN_KEY;
pub use auth::TokenManager;
pub use catalog::Catalog;
pub use finder::ArtistFinder;
pub use store::FileStore;
pub use store::KeyValueStore;
pub use store::MemoryStore;
pub use store::StoreError;
pub use view::ArtistView;
pub use view::DetailTicket;
pub use view::SearchState;
pub use view::SearchTicket;
pub use view::Section;
