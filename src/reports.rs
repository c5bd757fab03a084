use crate::types::{Aggregate, AggregateEntry, CleanRecord, Dimension};
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// How many locations the location aggregate keeps.
pub const TOP_LOCATIONS: usize = 5;

/// Group by `key`, fold `measure` into a per-key total, then order by total
/// descending. The map keeps first-seen order and the sort is stable, so ties
/// stay in the order they first appeared. Totals saturate at `u64::MAX`.
fn ranked_by<F, M>(data: &[CleanRecord], key: F, measure: M) -> Vec<AggregateEntry<String>>
where
    F: Fn(&CleanRecord) -> &str,
    M: Fn(&CleanRecord) -> u64,
{
    let mut map: IndexMap<&str, u64> = IndexMap::new();
    for r in data {
        let total = map.entry(key(r)).or_default();
        *total = total.saturating_add(measure(r));
    }
    let mut entries: Vec<AggregateEntry<String>> = map
        .into_iter()
        .map(|(k, value)| AggregateEntry {
            key: k.to_string(),
            value,
        })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

pub fn sentiment_counts(data: &[CleanRecord]) -> Aggregate<String> {
    let entries = ranked_by(data, |r| r.sentiment.as_str(), |_| 1);
    Aggregate::new(Dimension::Sentiment, entries)
}

/// Engagements summed per calendar day, oldest first.
pub fn daily_engagements(data: &[CleanRecord]) -> Aggregate<NaiveDate> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for r in data {
        let total = by_day.entry(r.date).or_default();
        *total = total.saturating_add(r.engagements);
    }
    let entries = by_day
        .into_iter()
        .map(|(key, value)| AggregateEntry { key, value })
        .collect();
    Aggregate::new(Dimension::EngagementTrend, entries)
}

pub fn platform_engagements(data: &[CleanRecord]) -> Aggregate<String> {
    let entries = ranked_by(data, |r| r.platform.as_str(), |r| r.engagements);
    Aggregate::new(Dimension::Platform, entries)
}

pub fn media_type_counts(data: &[CleanRecord]) -> Aggregate<String> {
    let entries = ranked_by(data, |r| r.media_type.as_str(), |_| 1);
    Aggregate::new(Dimension::MediaType, entries)
}

/// The [`TOP_LOCATIONS`] locations with the most engagements.
pub fn location_engagements(data: &[CleanRecord]) -> Aggregate<String> {
    let mut entries = ranked_by(data, |r| r.location.as_str(), |r| r.engagements);
    entries.truncate(TOP_LOCATIONS);
    Aggregate::new(Dimension::Location, entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(
        date: &str,
        platform: &str,
        sentiment: &str,
        location: &str,
        media: &str,
        eng: u64,
    ) -> CleanRecord {
        CleanRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            platform: platform.to_string(),
            sentiment: sentiment.to_string(),
            location: location.to_string(),
            media_type: media.to_string(),
            engagements: eng,
        }
    }

    fn keys<K: Clone>(agg: &Aggregate<K>) -> Vec<K> {
        agg.entries.iter().map(|e| e.key.clone()).collect()
    }

    #[test]
    fn sentiment_counts_descending_with_stable_ties() {
        let data = vec![
            rec("2024-01-01", "X", "Neutral", "US", "Video", 1),
            rec("2024-01-01", "X", "Positive", "US", "Video", 1),
            rec("2024-01-02", "X", "Positive", "US", "Video", 1),
            rec("2024-01-02", "X", "Negative", "US", "Video", 1),
        ];
        let agg = sentiment_counts(&data);
        assert_eq!(keys(&agg), vec!["Positive", "Neutral", "Negative"]);
        assert_eq!(agg.entries[0].value, 2);
        assert_eq!(agg.total(), 4);
    }

    #[test]
    fn daily_engagements_are_chronological() {
        let data = vec![
            rec("2024-01-03", "X", "P", "US", "V", 5),
            rec("2024-01-01", "X", "P", "US", "V", 7),
            rec("2024-01-03", "X", "P", "US", "V", 2),
        ];
        let agg = daily_engagements(&data);
        assert_eq!(agg.dimension, Dimension::EngagementTrend);
        assert_eq!(
            agg.rows(),
            vec![("2024-01-01".to_string(), 7), ("2024-01-03".to_string(), 7)]
        );
    }

    #[test]
    fn platform_sums_match_total_engagements() {
        let data = vec![
            rec("2024-01-01", "Twitter", "P", "US", "V", 10),
            rec("2024-01-01", "Facebook", "N", "UK", "V", 5),
            rec("2024-01-02", "Facebook", "N", "UK", "V", 6),
        ];
        let agg = platform_engagements(&data);
        assert_eq!(keys(&agg), vec!["Facebook", "Twitter"]);
        assert_eq!(agg.total(), 21);
    }

    #[test]
    fn media_type_counts_records() {
        let data = vec![
            rec("2024-01-01", "X", "P", "US", "Video", 100),
            rec("2024-01-01", "X", "P", "US", "Article", 0),
            rec("2024-01-01", "X", "P", "US", "Article", 0),
        ];
        let agg = media_type_counts(&data);
        assert_eq!(
            agg.rows(),
            vec![("Article".to_string(), 2), ("Video".to_string(), 1)]
        );
    }

    #[test]
    fn locations_are_truncated_to_top_five() {
        let data: Vec<CleanRecord> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .enumerate()
            .map(|(i, loc)| rec("2024-01-01", "X", "P", loc, "V", i as u64))
            .collect();
        let agg = location_engagements(&data);
        assert_eq!(agg.len(), TOP_LOCATIONS);
        assert_eq!(keys(&agg), vec!["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn huge_engagement_sums_saturate() {
        let big = 10_000_000_000_000_000_000;
        let data = vec![
            rec("2024-01-01", "X", "P", "US", "V", big),
            rec("2024-01-01", "X", "P", "US", "V", big),
        ];
        assert_eq!(platform_engagements(&data).entries[0].value, u64::MAX);
        assert_eq!(daily_engagements(&data).entries[0].value, u64::MAX);
        assert_eq!(location_engagements(&data).total(), u64::MAX);
    }

    #[test]
    fn empty_input_gives_empty_aggregates() {
        assert!(sentiment_counts(&[]).is_empty());
        assert!(daily_engagements(&[]).is_empty());
        assert!(location_engagements(&[]).is_empty());
    }
}
