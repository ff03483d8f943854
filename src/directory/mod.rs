//! Static directory endpoints: local markets, government bodies and loan schemes.
//!
//! Entries are canned fixtures with the requested location (and crop) filled in;
//! no external service is consulted.

pub mod fixtures;
pub mod handlers;

pub use handlers::config;
