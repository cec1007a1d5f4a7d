//! Read-only summaries over a filtered set of records, one per dashboard view.
//!
//! Records whose grouping key is empty (no department, no function, no month)
//! are left out of that grouping, not counted under a blank label.

use std::collections::{BTreeMap, HashMap};

use super::columns;
use super::model::{CellValue, HiringRecord, HiringType};

// ---------------------------------------------------------------------------
// KPI tiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kpis {
    pub total: usize,
    pub new_positions: usize,
    pub promotions: usize,
    pub replacements: usize,
}

pub fn kpis(records: &[&HiringRecord]) -> Kpis {
    let mut k = Kpis {
        total: records.len(),
        ..Kpis::default()
    };
    for r in records {
        match r.hiring_type {
            HiringType::NewPosition => k.new_positions += 1,
            HiringType::Promotion => k.promotions += 1,
            HiringType::Replacement => k.replacements += 1,
        }
    }
    k
}

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// Donut series: records per hiring type (types with no records are absent).
pub fn count_by_type(records: &[&HiringRecord]) -> BTreeMap<HiringType, usize> {
    let mut out = BTreeMap::new();
    for r in records {
        *out.entry(r.hiring_type).or_insert(0) += 1;
    }
    out
}

/// Grouped bar series: records per (year, type).
pub fn count_by_year_and_type(records: &[&HiringRecord]) -> BTreeMap<(i32, HiringType), usize> {
    let mut out = BTreeMap::new();
    for r in records {
        *out.entry((r.year, r.hiring_type)).or_insert(0) += 1;
    }
    out
}

fn key_text(cell: &CellValue) -> Option<String> {
    let text = cell.as_text();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Sort (label, count) pairs by count descending, then label ascending.
fn rank(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Records per department, largest first.
pub fn count_by_department(records: &[&HiringRecord]) -> Vec<(String, usize)> {
    let mut counts = HashMap::new();
    for r in records {
        if let Some(dept) = key_text(r.department()) {
            *counts.entry(dept).or_insert(0) += 1;
        }
    }
    rank(counts)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCount {
    pub department: String,
    pub function: String,
    pub count: usize,
}

/// Function counts per department: department ascending, then count
/// descending, then function name.
pub fn functions_by_department(records: &[&HiringRecord]) -> Vec<FunctionCount> {
    let mut counts: HashMap<(String, String), usize> = HashMap::new();
    for r in records {
        let (Some(department), Some(function)) = (key_text(r.department()), key_text(r.function()))
        else {
            continue;
        };
        *counts.entry((department, function)).or_insert(0) += 1;
    }
    let mut out: Vec<FunctionCount> = counts
        .into_iter()
        .map(|((department, function), count)| FunctionCount {
            department,
            function,
            count,
        })
        .collect();
    out.sort_by(|a, b| {
        a.department
            .cmp(&b.department)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.function.cmp(&b.function))
    });
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    /// `YYYY-MM`.
    pub period: String,
    pub hiring_type: HiringType,
    pub count: usize,
}

/// Monthly counts per hiring type, in period order.
pub fn monthly_timeline(records: &[&HiringRecord]) -> Vec<TimelinePoint> {
    let mut counts: BTreeMap<(String, HiringType), usize> = BTreeMap::new();
    for r in records {
        if let Some(period) = r.period() {
            *counts.entry((period, r.hiring_type)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((period, hiring_type), count)| TimelinePoint {
            period,
            hiring_type,
            count,
        })
        .collect()
}

/// The `n` most frequent job functions among records of `hiring_type`.
pub fn top_functions(
    records: &[&HiringRecord],
    hiring_type: HiringType,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts = HashMap::new();
    for r in records.iter().filter(|r| r.hiring_type == hiring_type) {
        if let Some(function) = key_text(r.function()) {
            *counts.entry(function).or_insert(0) += 1;
        }
    }
    let mut ranked = rank(counts);
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Detail tables
// ---------------------------------------------------------------------------

/// The three detail tabs and their fixed column projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailView {
    #[default]
    NewPositions,
    Promotions,
    All,
}

impl DetailView {
    pub const ALL: [DetailView; 3] = [DetailView::NewPositions, DetailView::Promotions, DetailView::All];

    pub fn title(self) -> &'static str {
        match self {
            DetailView::NewPositions => "Vagas Novas",
            DetailView::Promotions => "Promoções",
            DetailView::All => "Todas",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            DetailView::NewPositions => &[
                columns::YEAR,
                columns::MONTH,
                columns::DEPARTMENT,
                columns::FUNCTION,
            ],
            DetailView::Promotions => &[
                columns::YEAR,
                columns::MONTH,
                columns::DEPARTMENT,
                columns::FUNCTION,
                columns::EMPLOYEE,
            ],
            DetailView::All => &[
                columns::YEAR,
                columns::MONTH,
                columns::DEPARTMENT,
                columns::HIRING_TYPE,
                columns::FUNCTION,
                columns::EMPLOYEE,
            ],
        }
    }

    fn includes(self, record: &HiringRecord) -> bool {
        match self {
            DetailView::NewPositions => record.hiring_type == HiringType::NewPosition,
            DetailView::Promotions => record.hiring_type == HiringType::Promotion,
            DetailView::All => true,
        }
    }

    /// Rows of the view, already projected and rendered as text.
    pub fn rows(self, records: &[&HiringRecord]) -> Vec<Vec<String>> {
        records
            .iter()
            .filter(|r| self.includes(r))
            .map(|r| {
                self.columns()
                    .iter()
                    .map(|c| r.get(c).as_text())
                    .collect()
            })
            .collect()
    }
}
