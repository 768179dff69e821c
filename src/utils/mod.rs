mod derive;
mod time;

pub use derive::{collection_stats, derive_view, language_options, CollectionStats};
pub use time::format_relative;
