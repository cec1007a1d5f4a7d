use std::collections::BTreeSet;

use super::model::{HiringDataset, HiringRecord, HiringType};

// ---------------------------------------------------------------------------
// Filter predicate: which years and hiring types are selected
// ---------------------------------------------------------------------------

/// Sidebar selection state. An empty set selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub years: BTreeSet<i32>,
    pub hiring_types: BTreeSet<HiringType>,
}

impl FilterState {
    /// Everything the dataset contains selected (i.e., show everything).
    pub fn all(dataset: &HiringDataset) -> Self {
        FilterState {
            years: dataset.years.clone(),
            hiring_types: dataset.hiring_types.clone(),
        }
    }

    pub fn matches(&self, record: &HiringRecord) -> bool {
        self.years.contains(&record.year) && self.hiring_types.contains(&record.hiring_type)
    }
}

/// Return indices of records that pass both the year and type selections.
pub fn filtered_indices(dataset: &HiringDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Resolve indices into record references.
pub fn select<'a>(dataset: &'a HiringDataset, indices: &[usize]) -> Vec<&'a HiringRecord> {
    indices
        .iter()
        .filter_map(|&i| dataset.records.get(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(year: i32, hiring_type: HiringType) -> HiringRecord {
        HiringRecord {
            year,
            month: Some(1),
            hiring_type,
            fields: BTreeMap::new(),
        }
    }

    fn dataset() -> HiringDataset {
        HiringDataset::from_records(
            vec![],
            vec![
                record(2024, HiringType::NewPosition),
                record(2024, HiringType::Promotion),
                record(2025, HiringType::Replacement),
                record(2025, HiringType::NewPosition),
                record(2025, HiringType::Promotion),
            ],
        )
    }

    #[test]
    fn all_selects_everything() {
        let ds = dataset();
        let f = FilterState::all(&ds);
        assert_eq!(filtered_indices(&ds, &f), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn filter_is_intersection_of_both_predicates() {
        let ds = dataset();
        let f = FilterState {
            years: BTreeSet::from([2025]),
            hiring_types: BTreeSet::from([HiringType::NewPosition, HiringType::Promotion]),
        };
        let idx = filtered_indices(&ds, &f);
        assert_eq!(idx, vec![3, 4]);

        let all = filtered_indices(&ds, &FilterState::all(&ds));
        let expected: Vec<usize> = ds
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| f.years.contains(&r.year) && f.hiring_types.contains(&r.hiring_type))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(idx, expected);
        assert!(idx.iter().all(|i| all.contains(i)));
    }

    #[test]
    fn empty_selection_hides_everything() {
        let ds = dataset();
        let f = FilterState {
            years: BTreeSet::new(),
            hiring_types: ds.hiring_types.clone(),
        };
        assert!(filtered_indices(&ds, &f).is_empty());
    }

    #[test]
    fn filtering_leaves_the_dataset_untouched() {
        let ds = dataset();
        let before = ds.len();
        let f = FilterState {
            years: BTreeSet::from([2024]),
            hiring_types: ds.hiring_types.clone(),
        };
        let rows = select(&ds, &filtered_indices(&ds, &f));
        assert_eq!(rows.len(), 2);
        assert_eq!(ds.len(), before);
    }
}
