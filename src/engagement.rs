/// Rate rendered when no figure can be produced.
pub const FALLBACK_RATE: &str = "0.00";

/// Engagement figures for one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementStats {
    pub followers: u64,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub engagement_rate: f64,
}

impl EngagementStats {
    /// Builds the stats record, or `None` when there are no followers or
    /// either sample has no positive entries.
    pub fn from_samples(followers: u64, likes: &[u64], comments: &[u64]) -> Option<Self> {
        if followers == 0 {
            return None;
        }
        let avg_likes = positive_mean(likes)?;
        let avg_comments = positive_mean(comments)?;
        let raw = (avg_likes + avg_comments) / followers as f64 * 100.0;

        Some(EngagementStats {
            followers,
            avg_likes,
            avg_comments,
            engagement_rate: round2(raw),
        })
    }
}

/// Engagement rate as a percentage rounded to two decimals:
/// `(mean(likes) + mean(comments)) / followers * 100`.
///
/// Zero entries are ignored. Returns `0.0` when `followers` is zero or
/// either sample is empty.
pub fn engagement_rate(followers: u64, likes: &[u64], comments: &[u64]) -> f64 {
    EngagementStats::from_samples(followers, likes, comments)
        .map(|s| s.engagement_rate)
        .unwrap_or(0.0)
}

/// Formats a rate for the response: shortest decimal form with at least
/// one fractional digit (`2.2`, `0.07`, `3.0`).
pub fn format_rate(rate: f64) -> String {
    if !rate.is_finite() {
        return FALLBACK_RATE.to_string();
    }
    if rate.fract() == 0.0 {
        format!("{rate:.1}")
    } else {
        format!("{rate}")
    }
}

/// Integer average as reported in `avgLikes` / `avgComments` (truncated).
pub fn truncated_mean(sample: &[u64]) -> u64 {
    if sample.is_empty() {
        return 0;
    }
    let sum: u128 = sample.iter().map(|&v| v as u128).sum();
    (sum / sample.len() as u128) as u64
}

fn positive_mean(sample: &[u64]) -> Option<f64> {
    let (sum, count) = sample
        .iter()
        .filter(|&&v| v > 0)
        .fold((0f64, 0usize), |(sum, count), &v| (sum + v as f64, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.is_finite() {
        rounded
    } else {
        0.0
    }
}
