/// Recent-item aggregator
///
/// Asks every enabled source for entries, then merges and ranks them.
/// The list is rebuilt from scratch on each call.

use crate::core::entry::Entry;
use crate::core::ranking::{merge_and_rank, MAX_RECENT_ENTRIES};
use crate::error::Result;
use crate::settings::UserSettings;
use crate::sources::{
    CustomFolderSource, RecentSource, RiderSource, SourceRoots, VisualStudioSource, VsCodeSource,
};
use tracing::debug;

/// Builds the ranked recent list
pub struct Aggregator {
    roots: SourceRoots,
}

impl Aggregator {
    /// Create an aggregator over explicit source roots
    pub fn new(roots: SourceRoots) -> Self {
        Self { roots }
    }

    /// Create an aggregator for the current user's directories
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SourceRoots::from_env()?))
    }

    pub fn roots(&self) -> &SourceRoots {
        &self.roots
    }

    /// Sources switched on in `settings`, custom folders last
    pub fn sources_for(settings: &UserSettings) -> Vec<Box<dyn RecentSource>> {
        let mut sources: Vec<Box<dyn RecentSource>> = Vec::new();

        if settings.include_visual_studio {
            sources.push(Box::new(VisualStudioSource));
        }
        if settings.include_vs_code {
            sources.push(Box::new(VsCodeSource));
        }
        if settings.include_rider {
            sources.push(Box::new(RiderSource));
        }
        sources.push(Box::new(CustomFolderSource::new(
            settings.custom_folders.clone(),
        )));

        sources
    }

    /// Collect, dedup, rank and cap
    pub fn recent(&self, settings: &UserSettings) -> Vec<Entry> {
        let sources = Self::sources_for(settings);
        self.recent_from(&sources, settings)
    }

    /// Same as `recent`, over a caller-supplied set of sources
    pub fn recent_from(
        &self,
        sources: &[Box<dyn RecentSource>],
        settings: &UserSettings,
    ) -> Vec<Entry> {
        let mut all = Vec::new();

        for source in sources {
            let found = source.collect(&self.roots);
            debug!(source = source.name(), count = found.len(), "collected entries");
            all.extend(found);
        }

        let ranked = merge_and_rank(all, settings, MAX_RECENT_ENTRIES);
        debug!(count = ranked.len(), "ranked recent list");
        ranked
    }
}
