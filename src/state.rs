use std::path::{Path, PathBuf};
use std::sync::Arc;

use hiring_dashboard::data::aggregate::DetailView;
use hiring_dashboard::data::filter::{FilterState, filtered_indices, select};
use hiring_dashboard::data::pipeline::{clear_cache, load_cached};
use hiring_dashboard::data::{HiringDataset, HiringRecord, HiringType};
use hiring_dashboard::settings::Settings;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Spreadsheet the dashboard reads.
    pub source_path: PathBuf,

    /// Prepared dataset (None until a load succeeds).
    pub dataset: Option<Arc<HiringDataset>>,

    /// Year and hiring-type selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Which detail table is showing.
    pub detail_view: DetailView,

    /// Error from the last load; replaces the whole report when set.
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            source_path: settings.source_path.clone(),
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            detail_view: DetailView::default(),
            error_message: None,
        }
    }

    /// Load (or fetch from cache) the spreadsheet at `path`.
    ///
    /// Any failure drops the current dataset; the report is all-or-nothing.
    pub fn load(&mut self, path: &Path) {
        self.source_path = path.to_path_buf();
        match load_cached(path) {
            Ok(dataset) => {
                log::info!(
                    "{} hiring records ready from {}",
                    dataset.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.visible_indices.clear();
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Clear the cache and read the current source again.
    pub fn reload(&mut self) {
        clear_cache();
        let path = self.source_path.clone();
        self.load(&path);
    }

    /// Ingest a prepared dataset and select everything.
    pub fn set_dataset(&mut self, dataset: Arc<HiringDataset>) {
        self.filters = FilterState::all(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.error_message = None;
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
    }

    /// The records currently passing the filters.
    pub fn visible_records(&self) -> Vec<&HiringRecord> {
        match &self.dataset {
            Some(ds) => select(ds, &self.visible_indices),
            None => Vec::new(),
        }
    }

    pub fn toggle_year(&mut self, year: i32) {
        if !self.filters.years.remove(&year) {
            self.filters.years.insert(year);
        }
        self.refilter();
    }

    pub fn toggle_type(&mut self, hiring_type: HiringType) {
        if !self.filters.hiring_types.remove(&hiring_type) {
            self.filters.hiring_types.insert(hiring_type);
        }
        self.refilter();
    }

    pub fn select_all_years(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters.years = ds.years.clone();
            self.refilter();
        }
    }

    pub fn select_no_years(&mut self) {
        self.filters.years.clear();
        self.refilter();
    }

    pub fn select_all_types(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters.hiring_types = ds.hiring_types.clone();
            self.refilter();
        }
    }

    pub fn select_no_types(&mut self) {
        self.filters.hiring_types.clear();
        self.refilter();
    }
}
