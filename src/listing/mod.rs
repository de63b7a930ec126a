//! Search, filtering, incremental pagination and related-job ranking over
//! the job collection.

pub mod debounce;
pub mod filter;
pub mod related;
pub mod session;
pub mod state;
pub mod window;

pub use filter::{FilterSelection, SearchQuery};
pub use session::SessionStore;
pub use state::ListingView;
pub use window::VisibleWindow;
