//! Markdown insight texts derived from a single aggregate.
//!
//! All five generators are one transform, [`ranked_insights`], driven by a
//! per-dimension [`InsightTemplate`]. Templates use `{label}` for the entry's
//! name and `{value}` for its formatted measure.

use crate::types::{Aggregate, AggregateEntry, ConcludingRecommendations, DimensionKey};
use crate::util::{format_int, format_percent};

/// Which entries the lead and runner-up lines talk about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// First and second entries of an already ranked aggregate. The
    /// runner-up line is skipped when there is only one entry.
    TopTwo,
    /// Largest and smallest value, earliest entry winning ties. Both lines
    /// are always present.
    PeakAndTrough,
}

/// How `{value}` is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Share of the aggregate total, one decimal place.
    Share,
    /// The raw measure with thousands separators.
    Total,
}

#[derive(Debug, Clone, Copy)]
pub struct InsightTemplate {
    pub fallback: &'static str,
    pub pick: Pick,
    pub value: ValueFormat,
    pub lead: &'static str,
    pub runner_up: Option<&'static str>,
    pub trailing: &'static [&'static str],
}

pub const SENTIMENT: InsightTemplate = InsightTemplate {
    fallback: "No sentiment data available.",
    pick: Pick::TopTwo,
    value: ValueFormat::Share,
    lead: "1. The dominant sentiment is **{label}**, accounting for **{value}%** of mentions. This sets the primary tone of the conversation.",
    runner_up: Some("2. **{label}** is the second most common response, indicating a significant secondary emotion from the audience."),
    trailing: &[
        "2. By comparing proportions, you can gauge the balance of opinion and determine if your messaging has the desired emotional impact.",
        "**Recommendation:** If negative sentiment is high, address the root causes. If positive, identify and amplify the content driving it.",
    ],
};

pub const ENGAGEMENT_TREND: InsightTemplate = InsightTemplate {
    fallback: "No engagement data available.",
    pick: Pick::PeakAndTrough,
    value: ValueFormat::Total,
    lead: "1. Peak engagement of **{value}** occurred on **{label}**. Analyze the content posted on this day to identify successful strategies.",
    runner_up: Some("2. The lowest engagement was **{value}** on **{label}**. Review this period to find opportunities for improvement."),
    trailing: &[
        "**Recommendation:** Replicate successful content from peak periods. Analyze and adjust your strategy based on periods of low engagement.",
    ],
};

pub const PLATFORM: InsightTemplate = InsightTemplate {
    fallback: "No platform data available.",
    pick: Pick::TopTwo,
    value: ValueFormat::Total,
    lead: "1. **{label}** is the leading platform, generating **{value}** engagements. This channel is your powerhouse for audience interaction.",
    runner_up: Some("2. **{label}** shows strong secondary performance with **{value}** engagements, offering an opportunity to diversify your reach."),
    trailing: &[
        "**Recommendation:** Allocate more resources to leading platforms. Re-evaluate or test new approaches on underperforming channels.",
    ],
};

pub const MEDIA_TYPE: InsightTemplate = InsightTemplate {
    fallback: "No media type data available.",
    pick: Pick::TopTwo,
    value: ValueFormat::Share,
    lead: "1. **{label}** is the most used format, making up **{value}%** of your content.",
    runner_up: None,
    trailing: &[
        "**Recommendation:** Prioritize creating content in the formats your audience engages with most. Experiment with converting high-performing content into different media types.",
    ],
};

pub const LOCATION: InsightTemplate = InsightTemplate {
    fallback: "No location data available.",
    pick: Pick::TopTwo,
    value: ValueFormat::Total,
    lead: "1. **{label}** is the top location with **{value}** engagements. This region contains your most active audience.",
    runner_up: Some("2. **{label}** is another key geographical market. Nurturing this audience could open new growth opportunities."),
    trailing: &[
        "**Recommendation:** Launch localized campaigns or geo-targeted ads to deepen engagement in top locations.",
    ],
};

/// Render insight lines for `agg` using `template`.
///
/// Never fails: an empty aggregate yields the template's single fallback line.
pub fn ranked_insights<K: DimensionKey>(
    agg: &Aggregate<K>,
    template: &InsightTemplate,
) -> Vec<String> {
    let Some((lead, runner_up)) = pick_entries(&agg.entries, template.pick) else {
        return vec![template.fallback.to_string()];
    };
    let total = agg.total();
    let fill = |tpl: &str, entry: &AggregateEntry<K>| {
        let value = match template.value {
            ValueFormat::Share => format_percent(entry.value, total),
            ValueFormat::Total => format_int(entry.value),
        };
        // `{value}` first: the formatted number never contains a placeholder,
        // while a key may.
        tpl.replace("{value}", &value)
            .replace("{label}", &entry.key.insight_label())
    };

    let mut out = vec![fill(template.lead, lead)];
    if let (Some(tpl), Some(entry)) = (template.runner_up, runner_up) {
        out.push(fill(tpl, entry));
    }
    out.extend(template.trailing.iter().map(|s| s.to_string()));
    out
}

fn pick_entries<K>(
    entries: &[AggregateEntry<K>],
    pick: Pick,
) -> Option<(&AggregateEntry<K>, Option<&AggregateEntry<K>>)> {
    let first = entries.first()?;
    match pick {
        Pick::TopTwo => Some((first, entries.get(1))),
        Pick::PeakAndTrough => {
            let (mut peak, mut trough) = (first, first);
            for e in &entries[1..] {
                if e.value > peak.value {
                    peak = e;
                }
                if e.value < trough.value {
                    trough = e;
                }
            }
            Some((peak, Some(trough)))
        }
    }
}

pub fn sentiment_insights<K: DimensionKey>(agg: &Aggregate<K>) -> Vec<String> {
    ranked_insights(agg, &SENTIMENT)
}

pub fn engagement_trend_insights<K: DimensionKey>(agg: &Aggregate<K>) -> Vec<String> {
    ranked_insights(agg, &ENGAGEMENT_TREND)
}

pub fn platform_insights<K: DimensionKey>(agg: &Aggregate<K>) -> Vec<String> {
    ranked_insights(agg, &PLATFORM)
}

pub fn media_type_insights<K: DimensionKey>(agg: &Aggregate<K>) -> Vec<String> {
    ranked_insights(agg, &MEDIA_TYPE)
}

pub fn location_insights<K: DimensionKey>(agg: &Aggregate<K>) -> Vec<String> {
    ranked_insights(agg, &LOCATION)
}

/// Fixed closing advice shown after the five sections.
pub fn concluding_recommendations() -> ConcludingRecommendations {
    ConcludingRecommendations {
        working: lines(&[
            "**High-Engagement Platforms:** Continue investing in your top-performing platforms.",
            "**Popular Content Formats:** Double down on creating content in formats that resonate with your audience.",
            "**Strong Geographic Reach:** Leverage high engagement in key locations with targeted campaigns.",
        ]),
        needs_improvement: lines(&[
            "**Underperforming Platforms:** Re-evaluate your strategy for channels with low engagement.",
            "**Negative Sentiment:** Identify and address the root causes of negative feedback promptly.",
            "**Engagement Dips:** Analyze periods of low engagement to identify weaknesses and avoid future lulls.",
        ]),
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;
    use chrono::NaiveDate;

    fn agg(dimension: Dimension, pairs: &[(&str, u64)]) -> Aggregate<String> {
        Aggregate::new(
            dimension,
            pairs
                .iter()
                .map(|(k, v)| AggregateEntry { key: k.to_string(), value: *v })
                .collect(),
        )
    }

    fn day(d: u32, value: u64) -> AggregateEntry<NaiveDate> {
        AggregateEntry { key: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), value }
    }

    #[test]
    fn empty_aggregates_fall_back() {
        let empty: Aggregate<String> = Aggregate::new(Dimension::Platform, vec![]);
        assert_eq!(sentiment_insights(&empty), vec!["No sentiment data available."]);
        assert_eq!(
            engagement_trend_insights(&empty),
            vec!["No engagement data available."]
        );
        assert_eq!(platform_insights(&empty), vec!["No platform data available."]);
        assert_eq!(media_type_insights(&empty), vec!["No media type data available."]);
        assert_eq!(location_insights(&empty), vec!["No location data available."]);
    }

    #[test]
    fn sentiment_with_runner_up() {
        let sentiment = agg(Dimension::Sentiment, &[("Positive", 1), ("Negative", 1)]);
        let out = sentiment_insights(&sentiment);
        assert_eq!(out.len(), 4);
        assert_eq!(
            out[0],
            "1. The dominant sentiment is **Positive**, accounting for **50.0%** of mentions. This sets the primary tone of the conversation."
        );
        assert!(out[1].starts_with("2. **Negative** is the second most common response"));
        assert!(out[2].starts_with("2. By comparing proportions"));
        assert!(out[3].starts_with("**Recommendation:** If negative sentiment is high"));
    }

    #[test]
    fn sentiment_single_entry_has_no_runner_up() {
        let out = sentiment_insights(&agg(Dimension::Sentiment, &[("Neutral", 3)]));
        assert_eq!(out.len(), 3);
        assert!(out[0].contains("**100.0%**"));
        assert!(out[1].starts_with("2. By comparing proportions"));
    }

    #[test]
    fn engagement_trend_peak_and_trough() {
        let trend = Aggregate::new(
            Dimension::EngagementTrend,
            vec![day(1, 500), day(2, 12_345), day(3, 12_345), day(4, 20), day(5, 20)],
        );
        let out = engagement_trend_insights(&trend);
        assert_eq!(
            out[0],
            "1. Peak engagement of **12,345** occurred on **Jan 02, 2024**. Analyze the content posted on this day to identify successful strategies."
        );
        assert_eq!(
            out[1],
            "2. The lowest engagement was **20** on **Jan 04, 2024**. Review this period to find opportunities for improvement."
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn engagement_trend_single_day_is_both_peak_and_trough() {
        let trend = Aggregate::new(Dimension::EngagementTrend, vec![day(9, 7)]);
        let out = engagement_trend_insights(&trend);
        assert!(out[0].contains("**7** occurred on **Jan 09, 2024**"));
        assert!(out[1].contains("**7** on **Jan 09, 2024**"));
    }

    #[test]
    fn platform_lists_top_two_with_values() {
        let platforms = agg(Dimension::Platform, &[("Twitter", 10_000), ("Facebook", 5)]);
        let out = platform_insights(&platforms);
        assert_eq!(
            out,
            vec![
                "1. **Twitter** is the leading platform, generating **10,000** engagements. This channel is your powerhouse for audience interaction.".to_string(),
                "2. **Facebook** shows strong secondary performance with **5** engagements, offering an opportunity to diversify your reach.".to_string(),
                "**Recommendation:** Allocate more resources to leading platforms. Re-evaluate or test new approaches on underperforming channels.".to_string(),
            ]
        );
    }

    #[test]
    fn media_type_reports_share_only() {
        let media = agg(Dimension::MediaType, &[("Video", 2), ("Article", 1)]);
        let out = media_type_insights(&media);
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0],
            "1. **Video** is the most used format, making up **66.7%** of your content."
        );
    }

    #[test]
    fn location_runner_up_has_no_value() {
        let locations = agg(Dimension::Location, &[("USA", 1_500), ("UK", 900)]);
        let out = location_insights(&locations);
        assert_eq!(
            out[0],
            "1. **USA** is the top location with **1,500** engagements. This region contains your most active audience."
        );
        assert_eq!(
            out[1],
            "2. **UK** is another key geographical market. Nurturing this audience could open new growth opportunities."
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn keys_containing_placeholders_are_kept_verbatim() {
        let platforms = agg(Dimension::Platform, &[("{value}", 7), ("{label}", 3)]);
        let out = platform_insights(&platforms);
        assert_eq!(
            out[0],
            "1. **{value}** is the leading platform, generating **7** engagements. This channel is your powerhouse for audience interaction."
        );
        let runner_up = &out[1];
        assert!(runner_up.starts_with("2. **{label}** shows strong secondary"), "{runner_up}");
        assert!(runner_up.contains("with **3** engagements"), "{runner_up}");

        let sentiment = agg(Dimension::Sentiment, &[("{value}%", 1)]);
        let lead = &sentiment_insights(&sentiment)[0];
        assert!(lead.contains("**{value}%**, accounting for **100.0%**"), "{lead}");
    }

    #[test]
    fn zero_total_share_does_not_produce_nan() {
        let out = media_type_insights(&agg(Dimension::MediaType, &[("Video", 0)]));
        assert!(out[0].contains("**0.0%**"));
    }

    #[test]
    fn concluding_recommendations_have_three_each() {
        let c = concluding_recommendations();
        assert_eq!(c.working.len(), 3);
        assert_eq!(c.needs_improvement.len(), 3);
    }
}
