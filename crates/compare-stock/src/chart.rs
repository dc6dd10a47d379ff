//! Chart data preparation for the combined table

use crate::align::{CombinedSeries, Side};
use crate::error::StockError;
use crate::series::Symbol;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the comparison is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl FromStr for ChartKind {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" | "l" => Ok(ChartKind::Line),
            "bar" | "b" => Ok(ChartKind::Bar),
            other => Err(StockError::CommandError(format!(
                "Unknown chart type '{other}' (expected line or bar)"
            ))),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Line => f.write_str("Line"),
            ChartKind::Bar => f.write_str("Bar"),
        }
    }
}

/// One plotted value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub side: Side,
    pub price: f64,
}

/// Long-form view of a combined table, ready to draw
///
/// Each populated cell becomes one `(date, side, price)` point; empty cells
/// produce no point.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub symbols: (Symbol, Symbol),
    pub dates: Vec<NaiveDate>,
    pub points: Vec<ChartPoint>,
    /// Lowest and highest plotted price; `None` when there are no points
    pub bounds: Option<(f64, f64)>,
}

impl ChartData {
    pub fn from_combined(combined: &CombinedSeries, kind: ChartKind) -> Self {
        let mut points = Vec::with_capacity(combined.len() * 2);

        for row in combined.rows() {
            if let Some(price) = row.first {
                points.push(ChartPoint {
                    date: row.date,
                    side: Side::First,
                    price,
                });
            }
            if let Some(price) = row.second {
                points.push(ChartPoint {
                    date: row.date,
                    side: Side::Second,
                    price,
                });
            }
        }

        let bounds = points.iter().map(|p| p.price).fold(None::<(f64, f64)>, |acc, price| {
            Some(match acc {
                None => (price, price),
                Some((lo, hi)) => (f64::min(lo, price), f64::max(hi, price)),
            })
        });

        let (first, second) = combined.symbols();
        Self {
            kind,
            symbols: (first.clone(), second.clone()),
            dates: combined.dates().collect(),
            points,
            bounds,
        }
    }

    pub fn symbol(&self, side: Side) -> &Symbol {
        match side {
            Side::First => &self.symbols.0,
            Side::Second => &self.symbols.1,
        }
    }

    /// Points for one side, ascending by date
    pub fn points_for(&self, side: Side) -> impl Iterator<Item = &ChartPoint> + '_ {
        self.points.iter().filter(move |p| p.side == side)
    }
}
