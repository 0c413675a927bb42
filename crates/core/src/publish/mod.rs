//! Publication helpers for staged output: checksums and zip archives.

pub mod archive;
pub mod checksum;

pub use archive::create_zip_archive;
pub use checksum::publish_sha256;
