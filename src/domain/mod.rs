//! Domain logic - version parsing, ordering and incrementing, independent of git

pub mod increment;
pub mod listing;
pub mod version;

pub use increment::{next_version, VersionIncrement};
pub use listing::{collect_versions, ListingLine, VersionListing};
pub use version::{parse_tag, ParsedTag, Version};
