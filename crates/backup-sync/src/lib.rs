pub mod bundle;
pub mod codec;
pub mod filter;
pub mod params;
pub mod paths;
pub mod preset;
pub mod sync;
pub mod transport;

pub use bundle::{BundleError, BundleService};
pub use codec::{ArchiveCodec, BundleSource};
pub use filter::EntryFilter;
pub use params::SyncParams;
pub use preset::{DatabasePreset, GlobalPreset, NodePreset};
pub use sync::{SyncError, SyncService};
pub use transport::ArchiveTransport;
