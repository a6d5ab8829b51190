//! Terminal rendering
//!
//! Writes panel state as text tables, JSON or CSV. A panel without a
//! restaurant renders its zero state like any other; only the bookings
//! table prints an error banner.

use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

use crate::aggregate::{
    paginate, status_breakdown, BookingFilter, ComparisonChart, DashboardOverview, RatingSummary,
    SeriesPoint,
};
use crate::models::{Booking, BookingDashboard, MonthlyStats};
use crate::view::PanelState;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
    Csv,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            other => Err(format!("Invalid format: {}. Use: table, json, csv", other)),
        }
    }
}

/// `1234.5` -> `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<T: Serialize>(out: &mut dyn Write, rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_series(out: &mut dyn Write, title: &str, series: &[SeriesPoint]) -> anyhow::Result<()> {
    writeln!(out, "{}", title)?;
    let max = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    for point in series {
        let width = if max > 0.0 {
            ((point.value / max) * 30.0).round() as usize
        } else {
            0
        };
        writeln!(out, "  {:<4} {:>10.2} {}", point.label, point.value, "#".repeat(width))?;
    }
    Ok(())
}

fn write_no_restaurant<T>(out: &mut dyn Write, state: &PanelState<T>) -> anyhow::Result<()> {
    if state.restaurant_id.is_none() {
        writeln!(out, "(no restaurant selected)")?;
    }
    Ok(())
}

/// One CSV record of the overview: `section,label,value`
#[derive(Debug, Serialize)]
struct OverviewRow {
    section: &'static str,
    label: &'static str,
    value: f64,
}

/// Cards first, then the monthly revenue and weekday series
fn overview_rows(overview: &DashboardOverview) -> Vec<OverviewRow> {
    let cards = &overview.cards;
    let card = |label, value| OverviewRow {
        section: "cards",
        label,
        value,
    };

    let mut rows = vec![
        card("totalRevenue", cards.total_revenue),
        card("activeDeals", cards.active_deals as f64),
        card("bookingsToday", cards.bookings_today as f64),
        card("averageRating", cards.average_rating),
    ];
    let series = [
        ("monthlyRevenue", &overview.monthly_revenue),
        ("bookingsByDay", &overview.bookings_by_day),
    ];
    for (section, points) in series {
        rows.extend(points.iter().map(|p| OverviewRow {
            section,
            label: p.label,
            value: p.value,
        }));
    }
    rows
}

/// Overview cards plus revenue and weekday charts
pub fn render_overview(
    out: &mut dyn Write,
    state: &PanelState<DashboardOverview>,
    format: Format,
) -> anyhow::Result<()> {
    let overview = &state.data;
    match format {
        Format::Json => write_json(out, overview),
        Format::Csv => write_csv(out, &overview_rows(overview)),
        Format::Table => {
            write_no_restaurant(out, state)?;
            let cards = &overview.cards;
            writeln!(out, "Total revenue:   {}", format_currency(cards.total_revenue))?;
            writeln!(out, "Active deals:    {}", cards.active_deals)?;
            writeln!(out, "Bookings today:  {}", cards.bookings_today)?;
            writeln!(out, "Average rating:  {:.2}", cards.average_rating)?;
            writeln!(out)?;
            write_series(out, "Monthly revenue", &overview.monthly_revenue)?;
            writeln!(out)?;
            write_series(out, "Bookings by day", &overview.bookings_by_day)
        }
    }
}

/// Monthly analytics stat cards
pub fn render_stats(
    out: &mut dyn Write,
    state: &PanelState<MonthlyStats>,
    format: Format,
) -> anyhow::Result<()> {
    let stats = &state.data;
    match format {
        Format::Json => write_json(out, stats),
        Format::Csv => write_csv(out, std::slice::from_ref(stats)),
        Format::Table => {
            write_no_restaurant(out, state)?;
            writeln!(out, "Active deals:     {}", stats.active_deals_count)?;
            writeln!(out, "Redemptions:      {}", stats.total_redemptions)?;
            writeln!(out, "Revenue:          {}", format_currency(stats.total_revenue))?;
            writeln!(
                out,
                "Redemption rate:  {:.1}%",
                stats.avg_redemption_rate * 100.0
            )?;
            Ok(())
        }
    }
}

/// Two-deal comparison rows
pub fn render_comparison(
    out: &mut dyn Write,
    state: &PanelState<ComparisonChart>,
    format: Format,
) -> anyhow::Result<()> {
    let chart = &state.data;
    match format {
        Format::Json => write_json(out, chart),
        Format::Csv => write_csv(out, &chart.rows),
        Format::Table => {
            write_no_restaurant(out, state)?;
            if chart.rows.is_empty() {
                writeln!(out, "No deals to compare")?;
                return Ok(());
            }

            let legend = |i: usize| chart.series.get(i).map(String::as_str).unwrap_or("-");
            writeln!(out, "{:<8} | {:<16} | {:<16}", "Day", legend(0), legend(1))?;
            writeln!(out, "{}", "-".repeat(46))?;
            for row in &chart.rows {
                writeln!(out, "{:<8} | {:<16} | {:<16}", row.day, row.deal1, row.deal2)?;
            }
            Ok(())
        }
    }
}

/// Monthly average ratings and the yearly figure
pub fn render_ratings(
    out: &mut dyn Write,
    state: &PanelState<RatingSummary>,
    format: Format,
) -> anyhow::Result<()> {
    let summary = &state.data;
    match format {
        Format::Json => write_json(out, summary),
        Format::Csv => write_csv(out, &summary.monthly),
        Format::Table => {
            write_no_restaurant(out, state)?;
            writeln!(out, "{:<6} | {}", "Month", "Avg rating")?;
            writeln!(out, "{}", "-".repeat(20))?;
            for point in &summary.monthly {
                let value = if point.avg_rating == 0.0 {
                    "-".to_string()
                } else {
                    format!("{:.2}", point.avg_rating)
                };
                writeln!(out, "{:<6} | {}", point.month, value)?;
            }
            writeln!(out)?;
            writeln!(out, "Yearly average: {:.2}", summary.yearly_average)?;
            Ok(())
        }
    }
}

/// Bookings table options
#[derive(Debug, Clone)]
pub struct BookingTableOptions {
    pub filter: BookingFilter,
    pub page: usize,
    pub per_page: usize,
}

impl Default for BookingTableOptions {
    fn default() -> Self {
        Self {
            filter: BookingFilter::default(),
            page: 1,
            per_page: 10,
        }
    }
}

/// Filtered, paginated bookings with summary counts
pub fn render_bookings(
    out: &mut dyn Write,
    state: &PanelState<BookingDashboard>,
    options: &BookingTableOptions,
    format: Format,
) -> anyhow::Result<()> {
    let dashboard = &state.data;
    let filtered: Vec<Booking> = options
        .filter
        .apply(&dashboard.bookings)
        .into_iter()
        .cloned()
        .collect();
    let page = paginate(&filtered, options.page, options.per_page);

    match format {
        Format::Json => write_json(
            out,
            &serde_json::json!({
                "error": state.error,
                "totalBookings": dashboard.total_bookings,
                "confirmedCount": dashboard.confirmed_count,
                "pendingCount": dashboard.pending_count,
                "cancelledCount": dashboard.cancelled_count,
                "statusBreakdown": status_breakdown(&dashboard.bookings),
                "page": page,
            }),
        ),
        Format::Csv => write_csv(out, &page.items),
        Format::Table => {
            if let Some(error) = &state.error {
                writeln!(out, "!! Failed to load bookings: {}", error)?;
                writeln!(out, "!! Run the command again to retry.")?;
                writeln!(out)?;
            }
            write_no_restaurant(out, state)?;

            writeln!(
                out,
                "Total: {}  Confirmed: {}  Pending: {}  Cancelled: {}",
                dashboard.total_bookings,
                dashboard.confirmed_count,
                dashboard.pending_count,
                dashboard.cancelled_count
            )?;
            writeln!(out)?;

            if page.items.is_empty() {
                writeln!(out, "No bookings")?;
                return Ok(());
            }

            writeln!(
                out,
                "{:<20} {:<12} {:<6} {:>5}  {:<10} {}",
                "Customer", "Date", "Time", "Party", "Status", "Requests"
            )?;
            writeln!(out, "{}", "-".repeat(78))?;
            for b in &page.items {
                writeln!(
                    out,
                    "{:<20} {:<12} {:<6} {:>5}  {:<10} {}",
                    b.customer_name,
                    b.parsed_date()
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| b.date.clone()),
                    b.time,
                    b.party_size,
                    b.status,
                    b.special_requests.as_deref().unwrap_or("")
                )?;
            }
            writeln!(out)?;
            writeln!(
                out,
                "Page {}/{} ({} matching)",
                page.page, page.total_pages, page.total_items
            )?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RestaurantId;
    use crate::models::BookingStatus;

    fn ready<T>(data: T) -> PanelState<T> {
        PanelState {
            restaurant_id: RestaurantId::new("r1"),
            data,
            loading: false,
            error: None,
        }
    }

    fn render_to_string(f: impl FnOnce(&mut dyn Write) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("table".parse::<Format>().unwrap(), Format::Table);
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234567.0), "$1,234,567.00");
        assert_eq!(format_currency(-12.3), "-$12.30");
    }

    #[test]
    fn test_empty_state_renders_zeros() {
        let state = PanelState {
            restaurant_id: None,
            data: DashboardOverview::default(),
            loading: false,
            error: None,
        };

        let text = render_to_string(|out| render_overview(out, &state, Format::Table));
        assert!(text.contains("(no restaurant selected)"));
        assert!(text.contains("Total revenue:   $0.00"));
        assert!(text.contains("Dec"));
        assert!(text.contains("Sun"));
    }

    #[test]
    fn test_overview_csv_covers_cards_and_both_series() {
        let mut overview = DashboardOverview::default();
        overview.cards.active_deals = 3;
        overview.bookings_by_day[4].value = 8.0;

        let text =
            render_to_string(|out| render_overview(out, &ready(overview), Format::Csv));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "section,label,value");
        assert!(lines.contains(&"cards,activeDeals,3.0"));
        assert!(lines.contains(&"monthlyRevenue,Dec,0.0"));
        assert!(lines.contains(&"bookingsByDay,Fri,8.0"));
        assert_eq!(lines.len(), 1 + 4 + 12 + 7);
    }

    #[test]
    fn test_ratings_csv() {
        let text = render_to_string(|out| {
            render_ratings(out, &ready(RatingSummary::default()), Format::Csv)
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "month,avgRating");
        assert_eq!(lines[1], "Jan,0.0");
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn test_comparison_table() {
        let chart = crate::aggregate::ComparisonChart {
            series: vec!["Happy Hour".into(), "Brunch".into()],
            rows: vec![crate::aggregate::ComparisonRow {
                day: "Mon".into(),
                deal1: 5,
                deal2: 3,
            }],
        };

        let text = render_to_string(|out| render_comparison(out, &ready(chart), Format::Table));
        assert!(text.contains("Happy Hour"));
        assert!(text.lines().any(|l| l.starts_with("Mon") && l.contains('5') && l.contains('3')));
    }

    #[test]
    fn test_bookings_error_banner_and_paging() {
        let bookings: Vec<Booking> = (0..5)
            .map(|i| Booking {
                customer_name: format!("Guest {}", i),
                status: if i % 2 == 0 {
                    BookingStatus::Confirmed
                } else {
                    BookingStatus::Pending
                },
                ..Default::default()
            })
            .collect();
        let mut state = ready(BookingDashboard {
            bookings,
            total_bookings: 5,
            ..Default::default()
        });
        state.error = Some("Request timeout".to_string());

        let options = BookingTableOptions {
            filter: BookingFilter::default().status(BookingStatus::Confirmed),
            page: 2,
            per_page: 2,
        };

        let text = render_to_string(|out| render_bookings(out, &state, &options, Format::Table));
        assert!(text.contains("Failed to load bookings: Request timeout"));
        assert!(text.contains("Guest 4"));
        assert!(!text.contains("Guest 0"));
        assert!(text.contains("Page 2/2 (3 matching)"));
    }

    #[test]
    fn test_bookings_json() {
        let state = ready(BookingDashboard::default());
        let text = render_to_string(|out| {
            render_bookings(out, &state, &BookingTableOptions::default(), Format::Json)
        });
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["page"]["totalPages"], 1);
        assert_eq!(value["statusBreakdown"].as_array().unwrap().len(), 5);
        assert!(value["error"].is_null());
    }
}
