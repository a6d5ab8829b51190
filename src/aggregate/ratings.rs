//! Monthly rating aggregation
//!
//! Combines per-deal monthly ratings into one 12-month series. Each deal's
//! list is index-aligned to calendar months (index 0 = January) and a rating
//! of zero means "no data that month". Only usable ratings count toward a
//! month's denominator, and only non-zero months count toward the yearly
//! figure.

use serde::Serialize;
use serde_json::Value;

use super::{round2, MONTH_LABELS};
use crate::models::DealRatings;

/// One month of the aggregated rating series
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingPoint {
    pub month: &'static str,
    pub avg_rating: f64,
}

/// Aggregated ratings across all deals
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Always 12 entries, January first
    pub monthly: Vec<RatingPoint>,
    /// Mean of the non-zero monthly values, or 0
    pub yearly_average: f64,
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self {
            monthly: MONTH_LABELS
                .iter()
                .map(|&month| RatingPoint {
                    month,
                    avg_rating: 0.0,
                })
                .collect(),
            yearly_average: 0.0,
        }
    }
}

impl RatingSummary {
    /// Months that have rating data
    pub fn rated_months(&self) -> usize {
        self.monthly.iter().filter(|p| p.avg_rating != 0.0).count()
    }
}

/// Parse a raw rating value
///
/// Numbers and numeric strings are accepted. Zero, non-finite and
/// non-numeric input is "no rating" and yields `None`.
pub fn parse_rating(value: &Value) -> Option<f64> {
    let rating = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (rating.is_finite() && rating != 0.0).then_some(rating)
}

/// Aggregate monthly ratings across deals
pub fn aggregate_monthly_ratings(deals: &[DealRatings]) -> RatingSummary {
    let mut sums = [0.0_f64; 12];
    let mut counts = [0_u32; 12];

    for deal in deals {
        // Entries past December are ignored
        for (idx, entry) in deal.monthly_ratings.iter().take(12).enumerate() {
            if let Some(rating) = entry.rating() {
                sums[idx] += rating;
                counts[idx] += 1;
            }
        }
    }

    let monthly: Vec<RatingPoint> = MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(idx, &month)| RatingPoint {
            month,
            avg_rating: if counts[idx] > 0 {
                round2(sums[idx] / counts[idx] as f64)
            } else {
                0.0
            },
        })
        .collect();

    let rated: Vec<f64> = monthly
        .iter()
        .map(|p| p.avg_rating)
        .filter(|r| *r != 0.0)
        .collect();

    let yearly_average = if rated.is_empty() {
        0.0
    } else {
        round2(rated.iter().sum::<f64>() / rated.len() as f64)
    };

    RatingSummary {
        monthly,
        yearly_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthRating;
    use serde_json::json;

    fn deal(title: &str, ratings: &[Value]) -> DealRatings {
        DealRatings {
            id: None,
            title: title.to_string(),
            monthly_ratings: ratings
                .iter()
                .enumerate()
                .map(|(i, r)| MonthRating {
                    month: MONTH_LABELS[i % 12].to_string(),
                    avg_rating: r.clone(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(&json!(4.5)), Some(4.5));
        assert_eq!(parse_rating(&json!("3.25")), Some(3.25));
        assert_eq!(parse_rating(&json!(" 4 ")), Some(4.0));
        assert_eq!(parse_rating(&json!(0)), None);
        assert_eq!(parse_rating(&json!("0")), None);
        assert_eq!(parse_rating(&json!("NaN")), None);
        assert_eq!(parse_rating(&json!("inf")), None);
        assert_eq!(parse_rating(&json!("great")), None);
        assert_eq!(parse_rating(&Value::Null), None);
        assert_eq!(parse_rating(&json!(true)), None);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = aggregate_monthly_ratings(&[]);
        assert_eq!(summary.monthly.len(), 12);
        assert!(summary.monthly.iter().all(|p| p.avg_rating == 0.0));
        assert_eq!(summary.yearly_average, 0.0);
        assert_eq!(summary, RatingSummary::default());
    }

    #[test]
    fn test_month_labels_are_calendar_order() {
        let summary = aggregate_monthly_ratings(&[]);
        let labels: Vec<&str> = summary.monthly.iter().map(|p| p.month).collect();
        assert_eq!(labels, MONTH_LABELS.to_vec());
    }

    #[test]
    fn test_mean_across_deals() {
        let deals = vec![
            deal("A", &[json!(4.0), json!(5.0)]),
            deal("B", &[json!(3.0), json!(0)]),
        ];

        let summary = aggregate_monthly_ratings(&deals);
        assert_eq!(summary.monthly[0].avg_rating, 3.5);
        // B has no data in February, so only A counts
        assert_eq!(summary.monthly[1].avg_rating, 5.0);
        assert_eq!(summary.monthly[2].avg_rating, 0.0);
        assert_eq!(summary.yearly_average, 4.25);
        assert_eq!(summary.rated_months(), 2);
    }

    #[test]
    fn test_zero_string_and_nan_do_not_count() {
        let deals = vec![
            deal("A", &[json!(4.0)]),
            deal("B", &[json!("0")]),
            deal("C", &[json!("NaN")]),
            deal("D", &[json!("not rated")]),
        ];

        let summary = aggregate_monthly_ratings(&deals);
        assert_eq!(summary.monthly[0].avg_rating, 4.0);
        assert_eq!(summary.yearly_average, 4.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let deals = vec![
            deal("A", &[json!(4.0)]),
            deal("B", &[json!(4.0)]),
            deal("C", &[json!(5.0)]),
        ];

        let summary = aggregate_monthly_ratings(&deals);
        assert_eq!(summary.monthly[0].avg_rating, 4.33);
    }

    #[test]
    fn test_yearly_is_mean_of_nonzero_months() {
        let deals = vec![
            deal(
                "A",
                &[
                    json!(4.1),
                    json!(0),
                    json!("3.7"),
                    json!(4.9),
                    json!(0),
                    json!(2.2),
                ],
            ),
            deal("B", &[json!(3.3), json!(4.4), json!(0), json!("x"), json!(1.0)]),
        ];

        let summary = aggregate_monthly_ratings(&deals);
        let nonzero: Vec<f64> = summary
            .monthly
            .iter()
            .map(|p| p.avg_rating)
            .filter(|r| *r != 0.0)
            .collect();
        let expected = round2(nonzero.iter().sum::<f64>() / nonzero.len() as f64);

        assert_eq!(summary.yearly_average, expected);
    }

    #[test]
    fn test_entries_past_december_ignored() {
        let mut ratings = vec![json!(0); 12];
        ratings.push(json!(5.0));
        let summary = aggregate_monthly_ratings(&[deal("A", &ratings)]);
        assert_eq!(summary.yearly_average, 0.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let deals = vec![deal("A", &[json!("4.5"), json!(0)])];
        let before = deals.clone();
        let _ = aggregate_monthly_ratings(&deals);
        assert_eq!(deals, before);
    }
}
