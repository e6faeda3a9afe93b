pub mod download;
pub mod zip_codec;

pub use download::HttpTransport;
pub use zip_codec::ZipCodec;
