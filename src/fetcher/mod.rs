pub mod header;
pub mod token_fetcher;

pub use token_fetcher::TokenFetcher;
