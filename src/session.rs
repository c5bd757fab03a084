//! Upload handling and the per-session cleaning memo.

use crate::error::{DashboardError, Result};
use crate::insights;
use crate::loader;
use crate::reports;
use crate::types::{CleanRecord, CleanedDataset, Dashboard, Section};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// One uploaded file: its display name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| DashboardError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// Identity of the upload: SHA-256 over name and content.
    pub fn key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update([0u8]);
        hasher.update(&self.bytes);
        format!("sha256:{:x}", hasher.finalize())
    }
}

/// Build every aggregate and insight list from a cleaned dataset.
pub fn build_dashboard(records: &[CleanRecord]) -> Dashboard {
    let sentiment = reports::sentiment_counts(records);
    let engagement_trend = reports::daily_engagements(records);
    let platform = reports::platform_engagements(records);
    let media_type = reports::media_type_counts(records);
    let location = reports::location_engagements(records);

    Dashboard {
        entries: records.len(),
        sentiment: Section {
            insights: insights::sentiment_insights(&sentiment),
            aggregate: sentiment,
        },
        engagement_trend: Section {
            insights: insights::engagement_trend_insights(&engagement_trend),
            aggregate: engagement_trend,
        },
        platform: Section {
            insights: insights::platform_insights(&platform),
            aggregate: platform,
        },
        media_type: Section {
            insights: insights::media_type_insights(&media_type),
            aggregate: media_type,
        },
        location: Section {
            insights: insights::location_insights(&location),
            aggregate: location,
        },
        conclusions: insights::concluding_recommendations(),
    }
}

/// Session state that outlives a single upload: successful cleanings,
/// keyed by upload identity. Failed uploads are not remembered.
#[derive(Debug, Default)]
pub struct Session {
    cleaned: HashMap<String, CleanedDataset>,
    hits: usize,
    misses: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean `upload`, reusing an earlier result for identical input.
    pub fn clean(&mut self, upload: &Upload) -> Result<&CleanedDataset> {
        let key = upload.key();
        if self.cleaned.contains_key(&key) {
            self.hits += 1;
            debug!(upload = %upload.name, %key, "reusing cleaned dataset");
        } else {
            self.misses += 1;
            debug!(upload = %upload.name, %key, "cleaning upload");
            let dataset = loader::load_and_clean(&upload.bytes)?;
            self.cleaned.insert(key.clone(), dataset);
        }
        Ok(&self.cleaned[&key])
    }

    /// Full pass for one upload: clean (memoized), aggregate, derive insights.
    ///
    /// Errors are logged here and handed back for display; the session stays
    /// usable for the next upload.
    pub fn process(&mut self, upload: &Upload) -> Result<Dashboard> {
        match self.clean(upload) {
            Ok(dataset) => Ok(build_dashboard(&dataset.records)),
            Err(e) => {
                warn!(upload = %upload.name, kind = e.kind(), "upload rejected: {e}");
                Err(e)
            }
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn cached_uploads(&self) -> usize {
        self.cleaned.len()
    }
}
