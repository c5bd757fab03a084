use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// The six logical columns every upload must provide, by normalized name.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "date",
    "platform",
    "sentiment",
    "location",
    "engagements",
    "mediatype",
];

/// One mention after coercion. `date` is always a real date: rows whose date
/// could not be parsed never become a `CleanRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanRecord {
    pub date: NaiveDate,
    pub platform: String,
    pub sentiment: String,
    pub location: String,
    pub media_type: String,
    pub engagements: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub dropped_rows: usize,
    pub defaulted_engagements: usize,
}

/// Output of the cleaning step. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedDataset {
    pub records: Vec<CleanRecord>,
    pub report: LoadReport,
}

impl CleanedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The five dashboard dimensions, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Sentiment,
    EngagementTrend,
    Platform,
    MediaType,
    Location,
}

impl Dimension {
    /// Section heading.
    pub fn title(self) -> &'static str {
        match self {
            Dimension::Sentiment => "Sentiment Breakdown",
            Dimension::EngagementTrend => "Engagement Trend Over Time",
            Dimension::Platform => "Platform Engagements",
            Dimension::MediaType => "Media Type Mix",
            Dimension::Location => "Top 5 Locations",
        }
    }

    /// Column headers for the key and the measure.
    pub fn headers(self) -> (&'static str, &'static str) {
        match self {
            Dimension::Sentiment => ("Sentiment", "Mentions"),
            Dimension::EngagementTrend => ("Date", "Total Engagements"),
            Dimension::Platform => ("Platform", "Total Engagements"),
            Dimension::MediaType => ("Media Type", "Mentions"),
            Dimension::Location => ("Location", "Total Engagements"),
        }
    }

    /// File stem used when exporting the aggregate.
    pub fn file_stem(self) -> &'static str {
        match self {
            Dimension::Sentiment => "sentiment",
            Dimension::EngagementTrend => "daily_engagements",
            Dimension::Platform => "platforms",
            Dimension::MediaType => "media_types",
            Dimension::Location => "top_locations",
        }
    }
}

/// A grouping key that knows how insight texts should name it.
pub trait DimensionKey: Clone + fmt::Display {
    fn insight_label(&self) -> String {
        self.to_string()
    }
}

impl DimensionKey for String {}

impl DimensionKey for NaiveDate {
    fn insight_label(&self) -> String {
        crate::util::format_insight_date(*self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateEntry<K> {
    pub key: K,
    pub value: u64,
}

/// Ordered key → measure mapping for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate<K> {
    pub dimension: Dimension,
    pub entries: Vec<AggregateEntry<K>>,
}

impl<K> Aggregate<K> {
    pub fn new(dimension: Dimension, entries: Vec<AggregateEntry<K>>) -> Self {
        Self { dimension, entries }
    }

    /// Sum of all values, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: fmt::Display> Aggregate<K> {
    /// Key/value pairs with the key rendered as text, for tables and exports.
    pub fn rows(&self) -> Vec<(String, u64)> {
        self.entries
            .iter()
            .map(|e| (e.key.to_string(), e.value))
            .collect()
    }
}

/// Aggregate plus the insights derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<K> {
    pub aggregate: Aggregate<K>,
    pub insights: Vec<String>,
}

/// Closing "what's working / what needs improvement" advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcludingRecommendations {
    pub working: Vec<String>,
    pub needs_improvement: Vec<String>,
}

/// Everything one upload produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub entries: usize,
    pub sentiment: Section<String>,
    pub engagement_trend: Section<NaiveDate>,
    pub platform: Section<String>,
    pub media_type: Section<String>,
    pub location: Section<String>,
    pub conclusions: ConcludingRecommendations,
}

/// Dimension-erased view of a section, for rendering.
#[derive(Debug, Clone)]
pub struct SectionView<'a> {
    pub dimension: Dimension,
    pub rows: Vec<(String, u64)>,
    pub insights: &'a [String],
}

impl Dashboard {
    /// Sections in display order.
    pub fn sections(&self) -> Vec<SectionView<'_>> {
        vec![
            view(&self.sentiment),
            view(&self.engagement_trend),
            view(&self.platform),
            view(&self.media_type),
            view(&self.location),
        ]
    }
}

fn view<K: fmt::Display>(section: &Section<K>) -> SectionView<'_> {
    SectionView {
        dimension: section.aggregate.dimension,
        rows: section.aggregate.rows(),
        insights: &section.insights,
    }
}
