use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::classify::classify;
use super::columns;
use super::dates::coerce_date;
use super::error::{PipelineError, Result};
use super::loader::load_table;
use super::model::{CellValue, HiringDataset, HiringRecord, HiringType, RawTable};
use super::normalize::normalize_columns;

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Load, normalize, classify and restrict a hiring spreadsheet.
///
/// Steps run in order: load → normalize column names → parse date columns →
/// classify → restrict to the year allow-set → validate required columns.
pub fn prepare(path: &Path) -> Result<HiringDataset> {
    let mut table = load_table(path).map_err(|source| PipelineError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "loaded {} rows x {} columns from {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );

    normalize_columns(&mut table.headers);
    parse_date_columns(&mut table);
    classify_rows(&mut table);
    restrict_years(&mut table);
    validate(&table)?;

    let dataset = into_dataset(table);
    log::info!(
        "prepared {} hiring records from {} (years {:?})",
        dataset.len(),
        path.display(),
        dataset.years
    );
    Ok(dataset)
}

/// Coerce every known date column to dates; unreadable cells become null.
pub fn parse_date_columns(table: &mut RawTable) {
    for name in columns::DATE_COLUMNS {
        let Some(idx) = table.column_index(name) else {
            continue;
        };
        let mut unparsed = 0usize;
        for row in &mut table.rows {
            let parsed = coerce_date(&row[idx]);
            if parsed.is_null() && !row[idx].is_null() {
                unparsed += 1;
            }
            row[idx] = parsed;
        }
        if unparsed > 0 {
            log::warn!("{unparsed} value(s) in '{name}' are not dates; left empty");
        }
    }
}

/// Append the derived hiring-type column.
pub fn classify_rows(table: &mut RawTable) {
    let reason_idx = table.column_index(columns::TERMINATION_REASON);
    let name_idx = table.column_index(columns::EMPLOYEE);
    let text_at = |row: &[CellValue], idx: Option<usize>| {
        idx.map(|i| row[i].as_text()).unwrap_or_default()
    };

    let existing = table.column_index(columns::HIRING_TYPE);
    if existing.is_none() {
        table.headers.push(columns::HIRING_TYPE.to_string());
    }

    for row in &mut table.rows {
        let kind = classify(
            &text_at(row.as_slice(), reason_idx),
            &text_at(row.as_slice(), name_idx),
        );
        let cell = CellValue::String(kind.label().to_string());
        match existing {
            Some(idx) => row[idx] = cell,
            None => row.push(cell),
        }
    }
}

/// Keep only rows whose year is in the allow-set. No-op without a year column.
pub fn restrict_years(table: &mut RawTable) {
    let Some(idx) = table.column_index(columns::YEAR) else {
        return;
    };
    let before = table.rows.len();
    table.rows.retain(|row| allowed_year(&row[idx]).is_some());
    let dropped = before - table.rows.len();
    if dropped > 0 {
        log::debug!("dropped {dropped} row(s) outside years {:?}", columns::ALLOWED_YEARS);
    }
}

/// Fail on the first required column that is absent.
pub fn validate(table: &RawTable) -> Result<()> {
    match columns::REQUIRED_COLUMNS
        .iter()
        .find(|name| !table.has_column(name))
    {
        Some(missing) => Err(PipelineError::Validation {
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

fn allowed_year(cell: &CellValue) -> Option<i32> {
    let year = i32::try_from(cell.as_whole_number()?).ok()?;
    columns::ALLOWED_YEARS.contains(&year).then_some(year)
}

fn month_of(cell: &CellValue) -> Option<u32> {
    let m = u32::try_from(cell.as_whole_number()?).ok()?;
    (1..=12).contains(&m).then_some(m)
}

fn into_dataset(table: RawTable) -> HiringDataset {
    let RawTable { headers, rows } = table;
    let year_idx = headers.iter().position(|h| h == columns::YEAR);
    let month_idx = headers.iter().position(|h| h == columns::MONTH);
    let type_idx = headers.iter().position(|h| h == columns::HIRING_TYPE);

    let records = rows
        .into_iter()
        .filter_map(|row| {
            let year = allowed_year(&row[year_idx?])?;
            let month = month_idx.and_then(|i| month_of(&row[i]));
            let hiring_type = HiringType::from_label(&row[type_idx?].as_text())?;
            let fields: BTreeMap<String, CellValue> =
                headers.iter().cloned().zip(row).collect();
            Some(HiringRecord {
                year,
                month,
                hiring_type,
                fields,
            })
        })
        .collect();

    HiringDataset::from_records(headers, records)
}

// ---------------------------------------------------------------------------
// Memoizing cache
// ---------------------------------------------------------------------------

/// Prepared datasets keyed by input path.
///
/// Entries live until [`DatasetCache::clear`]; failed loads are not stored.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, Arc<HiringDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, preparing it on first use.
    pub fn get_or_prepare(&self, path: &Path) -> Result<Arc<HiringDataset>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(ds) = entries.get(path) {
            log::debug!("cache hit for {}", path.display());
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(prepare(path)?);
        entries.insert(path.to_path_buf(), Arc::clone(&ds));
        Ok(ds)
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn global_cache() -> &'static DatasetCache {
    static CACHE: OnceLock<DatasetCache> = OnceLock::new();
    CACHE.get_or_init(DatasetCache::new)
}

/// [`prepare`] through the process-wide cache.
pub fn load_cached(path: &Path) -> Result<Arc<HiringDataset>> {
    global_cache().get_or_prepare(path)
}

/// Drop everything in the process-wide cache.
pub fn clear_cache() {
    global_cache().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn table(headers: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    #[test]
    fn restrict_keeps_only_allowed_years() {
        let mut t = table(
            &["ANO"],
            vec![
                vec![CellValue::Integer(2023)],
                vec![CellValue::Integer(2024)],
                vec![CellValue::Float(2025.0)],
                vec![s("2024")],
                vec![CellValue::Null],
                vec![s("dois mil")],
            ],
        );
        restrict_years(&mut t);
        assert_eq!(t.rows.len(), 3);
        for row in &t.rows {
            let y = allowed_year(&row[0]).unwrap();
            assert!(columns::ALLOWED_YEARS.contains(&y));
        }
    }

    #[test]
    fn restrict_without_year_column_is_noop() {
        let mut t = table(&["MES"], vec![vec![CellValue::Integer(1)]]);
        restrict_years(&mut t);
        assert_eq!(t.rows.len(), 1);
    }

    #[test]
    fn classify_appends_type_column() {
        let mut t = table(
            &["MOTIVO DO DESLIGAMENTO", "NOME - COLABORADOR"],
            vec![
                vec![s("Aumento de Quadro"), s("João")],
                vec![CellValue::Null, s("Maria - Promoção")],
                vec![s("Desligamento"), s("Carlos")],
            ],
        );
        classify_rows(&mut t);
        let idx = t.column_index(columns::HIRING_TYPE).unwrap();
        let labels: Vec<_> = t.rows.iter().map(|r| r[idx].as_text()).collect();
        assert_eq!(
            labels,
            vec![
                HiringType::NewPosition.label(),
                HiringType::Promotion.label(),
                HiringType::Replacement.label()
            ]
        );
    }

    #[test]
    fn classify_without_text_columns_defaults_to_replacement() {
        let mut t = table(&["ANO"], vec![vec![CellValue::Integer(2024)]]);
        classify_rows(&mut t);
        assert_eq!(t.rows[0][1], s(HiringType::Replacement.label()));
    }

    #[test]
    fn validate_names_first_missing_column() {
        let t = table(&["ANO", "MES", "SUPERINTENDENCIA", "TIPO DE CONTRATACAO"], vec![]);
        match validate(&t) {
            Err(PipelineError::Validation { column }) => assert_eq!(column, "FUNCAO"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn date_columns_become_dates_or_null() {
        let mut t = table(
            &["DATA ABERTURA DA VAGA", "OBS"],
            vec![
                vec![s("03/04/2024"), s("03/04/2024")],
                vec![s("sem data"), s("sem data")],
            ],
        );
        parse_date_columns(&mut t);
        assert!(matches!(t.rows[0][0], CellValue::Date(_)));
        assert_eq!(t.rows[1][0], CellValue::Null);
        // Columns outside the known set are untouched.
        assert_eq!(t.rows[0][1], s("03/04/2024"));
    }

    #[test]
    fn months_outside_calendar_are_dropped() {
        assert_eq!(month_of(&CellValue::Integer(12)), Some(12));
        assert_eq!(month_of(&CellValue::Float(3.0)), Some(3));
        assert_eq!(month_of(&CellValue::Integer(13)), None);
        assert_eq!(month_of(&s("jan")), None);
    }
}
