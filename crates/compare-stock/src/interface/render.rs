//! Terminal rendering of inputs, tables, charts and summaries

use crate::align::{CombinedSeries, Side};
use crate::chart::{ChartData, ChartKind};
use crate::series::PriceSeries;
use crate::session::{SessionInputs, SessionState, View};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

const PLOT_HEIGHT: usize = 12;
const BAR_WIDTH: usize = 40;

const FIRST_MARK: char = '*';
const SECOND_MARK: char = 'o';
const SHARED_MARK: char = '@';

fn new_table(headers: Vec<String>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn price(value: f64) -> String {
    format!("{value:.2}")
}

/// Every field of one series, one row per date
pub fn series_table(series: &PriceSeries) -> Table {
    let mut table = new_table(
        ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    );

    for bar in series.bars() {
        table.add_row(vec![
            Cell::new(bar.date),
            Cell::new(price(bar.open)),
            Cell::new(price(bar.high)),
            Cell::new(price(bar.low)),
            Cell::new(price(bar.close)),
            Cell::new(price(bar.adj_close)),
            Cell::new(bar.volume),
        ]);
    }
    table
}

/// Date plus one closing-price column per symbol; missing cells stay blank
pub fn combined_table(combined: &CombinedSeries) -> Table {
    let (first, second) = combined.symbols();
    let mut table = new_table(vec![
        "Date".to_string(),
        first.to_string(),
        second.to_string(),
    ]);

    let cell = |value: Option<f64>| Cell::new(value.map(price).unwrap_or_default());
    for row in combined.rows() {
        table.add_row(vec![Cell::new(row.date), cell(row.first), cell(row.second)]);
    }
    table
}

/// Current inputs as shown on the input view
pub fn inputs_table(inputs: &SessionInputs) -> Table {
    let mut table = new_table(vec!["Input".to_string(), "Value".to_string()]);
    table
        .add_row(vec!["First symbol".to_string(), inputs.first_symbol.to_string()])
        .add_row(vec!["Second symbol".to_string(), inputs.second_symbol.to_string()])
        .add_row(vec!["Start date".to_string(), inputs.range.start.to_string()])
        .add_row(vec!["End date".to_string(), inputs.range.end.to_string()])
        .add_row(vec!["Chart type".to_string(), inputs.chart_kind.to_string()]);
    table
}

/// Draw the chart the way its kind asks for
pub fn render_chart(chart: &ChartData) -> String {
    let Some((lo, hi)) = chart.bounds else {
        return "No prices to chart.".to_string();
    };

    let body = match chart.kind {
        ChartKind::Line => line_plot(chart, lo, hi),
        ChartKind::Bar => grouped_bars(chart, hi),
    };

    format!(
        "{body}\n{FIRST_MARK} {}   {SECOND_MARK} {}",
        chart.symbol(Side::First),
        chart.symbol(Side::Second),
    )
}

/// Map `value` in `lo..=hi` onto `0..steps`
fn scale(value: f64, lo: f64, hi: f64, steps: usize) -> usize {
    if steps <= 1 {
        return 0;
    }
    if hi <= lo {
        return steps / 2;
    }
    let ratio = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    (ratio * (steps - 1) as f64).round() as usize
}

fn line_plot(chart: &ChartData, lo: f64, hi: f64) -> String {
    let width = chart.dates.len() * 2;
    let mut grid = vec![vec![' '; width]; PLOT_HEIGHT];

    for point in &chart.points {
        let Ok(col) = chart.dates.binary_search(&point.date) else {
            continue;
        };
        let row = PLOT_HEIGHT - 1 - scale(point.price, lo, hi, PLOT_HEIGHT);
        let cell = &mut grid[row][col * 2];
        *cell = match (point.side, *cell) {
            (_, SHARED_MARK) => SHARED_MARK,
            (Side::First, SECOND_MARK) | (Side::Second, FIRST_MARK) => SHARED_MARK,
            (Side::First, _) => FIRST_MARK,
            (Side::Second, _) => SECOND_MARK,
        };
    }

    let mut out = String::new();
    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            price(hi)
        } else if i == PLOT_HEIGHT - 1 {
            price(lo)
        } else {
            String::new()
        };
        let line: String = row.iter().collect();
        out.push_str(&format!("{label:>10} |{}\n", line.trim_end()));
    }
    out.push_str(&format!("{:>10} +{}\n", "", "-".repeat(width.max(1))));

    if let (Some(first), Some(last)) = (chart.dates.first(), chart.dates.last()) {
        out.push_str(&format!("{:>10}  {first} .. {last}", ""));
    }
    out
}

fn grouped_bars(chart: &ChartData, hi: f64) -> String {
    let label_width = chart
        .symbol(Side::First)
        .as_str()
        .len()
        .max(chart.symbol(Side::Second).as_str().len());

    let mut out = String::new();
    for date in &chart.dates {
        for (side, mark) in [(Side::First, FIRST_MARK), (Side::Second, SECOND_MARK)] {
            let symbol = chart.symbol(side);
            let value = chart
                .points_for(side)
                .find(|p| p.date == *date)
                .map(|p| p.price);

            let bar = match value {
                Some(v) if hi > 0.0 => {
                    let len = scale(v.max(0.0), 0.0, hi, BAR_WIDTH + 1);
                    format!("{} {}", mark.to_string().repeat(len), price(v))
                }
                Some(v) => price(v),
                None => "-".to_string(),
            };
            out.push_str(&format!("{date} {symbol:<label_width$} |{bar}\n"));
        }
    }
    out.trim_end().to_string()
}

/// Everything shown on the results view
pub fn render_results(state: &SessionState) -> String {
    let Some(data) = state.loaded() else {
        let reason = state.last_error().unwrap_or("no data loaded");
        return format!("❌ Could not load the comparison: {reason}\nUse /back to change the inputs.");
    };

    let (first, second) = data.combined.symbols();
    let chart = ChartData::from_combined(data.combined, state.inputs().chart_kind);

    let mut out = String::new();
    out.push_str(&format!("{first} ({} rows)\n{}\n\n", data.first.len(), series_table(data.first)));
    out.push_str(&format!("{second} ({} rows)\n{}\n\n", data.second.len(), series_table(data.second)));
    out.push_str(&format!("Closing prices\n{}\n\n", combined_table(data.combined)));
    out.push_str(&format!("{} chart\n{}", chart.kind, render_chart(&chart)));

    if let Some(summary) = state.summary() {
        out.push_str(&format!("\n\nSummary\n{summary}"));
    }
    out
}

/// REPL prompt for the current view
pub fn prompt(state: &SessionState) -> String {
    match state.view() {
        View::Input => "compare[input]> ".to_string(),
        View::Results => "compare[results]> ".to_string(),
    }
}

pub fn format_error(error: &str) -> String {
    format!("❌ Error: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::chart::ChartKind;
    use crate::series::test_support::series;

    fn combined() -> CombinedSeries {
        let a = series("AAPL", &[(1, 10.0), (2, 11.0), (3, 12.0)]);
        let b = series("GOOGL", &[(2, 20.0), (3, 21.0), (4, 22.0)]);
        align(&a, a.symbol(), &b, b.symbol())
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(10.0, 10.0, 20.0, 11), 0);
        assert_eq!(scale(20.0, 10.0, 20.0, 11), 10);
        assert_eq!(scale(15.0, 10.0, 20.0, 11), 5);
        assert_eq!(scale(7.0, 7.0, 7.0, 12), 6);
    }

    #[test]
    fn test_combined_table_headers_and_blanks() {
        let rendered = combined_table(&combined()).to_string();
        assert!(rendered.contains("AAPL"));
        assert!(rendered.contains("GOOGL"));
        assert!(rendered.contains("2024-01-04"));
        assert!(rendered.contains("22.00"));
        assert!(!rendered.contains("None"));
    }

    #[test]
    fn test_series_table_lists_every_field() {
        let rendered = series_table(&series("AAPL", &[(1, 10.0)])).to_string();
        for header in ["Open", "High", "Low", "Close", "Adj Close", "Volume"] {
            assert!(rendered.contains(header), "{header}");
        }
        assert!(rendered.contains("1000"));
    }

    #[test]
    fn test_line_plot_marks_extremes() {
        let chart = ChartData::from_combined(&combined(), ChartKind::Line);
        let rendered = render_chart(&chart);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].contains("22.00"));
        assert!(lines[0].ends_with(SECOND_MARK));
        assert!(lines[PLOT_HEIGHT - 1].contains("10.00"));
        assert!(lines[PLOT_HEIGHT - 1].contains(FIRST_MARK));
        assert!(rendered.contains("2024-01-01 .. 2024-01-04"));
    }

    #[test]
    fn test_bar_chart_has_row_per_date_and_side() {
        let chart = ChartData::from_combined(&combined(), ChartKind::Bar);
        let rendered = render_chart(&chart);

        let bar_rows = rendered.lines().filter(|l| l.starts_with("2024-")).count();
        assert_eq!(bar_rows, 8);
        assert!(rendered.contains("2024-01-01 GOOGL |-"));
        assert!(rendered.contains(&"o".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_empty_chart() {
        let a = series("AAPL", &[]);
        let chart = ChartData::from_combined(&align(&a, a.symbol(), &a, a.symbol()), ChartKind::Line);
        assert_eq!(render_chart(&chart), "No prices to chart.");
    }
}
