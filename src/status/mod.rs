pub mod fetcher;
pub mod traits;

pub use fetcher::StatusClient;
