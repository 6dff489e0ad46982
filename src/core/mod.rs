/// Core functionality modules
///
/// Contains the main business logic: the entry model, merging and ranking
/// across sources, the popup filter, and launching.

pub mod aggregator;
pub mod entry;
pub mod launcher;
pub mod ranking;
pub mod searcher;

pub use aggregator::Aggregator;
pub use entry::{Entry, Origin};
pub use launcher::{LaunchCommand, Launcher, OpenTarget, Spawner, SystemSpawner};
pub use ranking::{merge_and_rank, MAX_RECENT_ENTRIES};
pub use searcher::{SearchResult, Searcher};
