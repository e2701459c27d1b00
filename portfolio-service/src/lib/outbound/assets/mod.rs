pub mod http;

pub use http::HttpAssetStore;
