pub mod client;
pub mod http;

#[cfg(test)]
pub(crate) mod mock;

pub use client::CharacterApi;
pub use http::HttpCharacterApi;
