use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::CategoryPalette;
use crate::data::dates::{date_bounds, DateRange};
use crate::data::filter::{all_categories, FilterCriteria};
use crate::data::loader::DatasetCache;
use crate::data::model::{Dataset, FieldValue, CATEGORY};
use crate::error::DashboardError;
use crate::views::{build_views, DashboardViews};

// ---------------------------------------------------------------------------
// Commands emitted by the UI
// ---------------------------------------------------------------------------

/// A user interaction. Widgets push commands while a frame is laid out;
/// [`AppState::dispatch`] applies them once the frame is done.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ToggleCategory(FieldValue),
    SelectAllCategories,
    SelectNoCategories,
    SetDateStart(NaiveDate),
    SetDateEnd(NaiveDate),
    ResetDateRange,
    Reload,
    Open(PathBuf),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// File the dataset was read from.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// `[min, max]` date span of the dataset, the default date range.
    pub date_bounds: Option<DateRange>,

    /// Views derived from `dataset` and `criteria` (cached per command).
    pub views: Option<DashboardViews>,

    /// Colours for the category column.
    pub palette: CategoryPalette,

    /// Loader failure; nothing else is shown while set.
    pub load_error: Option<DashboardError>,

    /// Filter failure; views stay hidden while set.
    pub filter_error: Option<DashboardError>,

    /// Dates could not be scanned for the default range.
    pub date_notice: Option<DashboardError>,

    cache: DatasetCache,
}

impl AppState {
    /// Load `path` and make it the current source.
    pub fn open(&mut self, path: PathBuf) {
        self.cache.clear();
        self.source = Some(path);
        self.reload();
    }

    /// Re-run the load for the current source. An unchanged file is served
    /// from the cache.
    pub fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };

        match self.cache.load(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    dataset.len(),
                    dataset.column_names,
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.views = None;
                self.filter_error = None;
                self.date_notice = None;
                self.load_error = Some(e);
            }
        }
    }

    /// Ingest a newly loaded dataset, reset filters and derived views.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.palette = dataset
            .distinct(CATEGORY)
            .map(CategoryPalette::new)
            .unwrap_or_default();

        match date_bounds(&dataset) {
            Ok(bounds) => {
                self.date_bounds = bounds;
                self.date_notice = None;
            }
            Err(e) => {
                log::warn!("No default date range: {e}");
                self.date_bounds = None;
                self.date_notice = Some(e);
            }
        }
        self.criteria = FilterCriteria::new(&dataset, self.date_bounds);

        self.dataset = Some(dataset);
        self.load_error = None;
        self.recompute();
    }

    /// Apply one user command and refresh the derived views.
    pub fn dispatch(&mut self, command: Command) {
        log::debug!("dispatch {command:?}");
        match command {
            Command::Open(path) => return self.open(path),
            Command::Reload => return self.reload(),
            Command::ToggleCategory(value) => {
                if !self.criteria.categories.remove(&value) {
                    self.criteria.categories.insert(value);
                }
            }
            Command::SelectAllCategories => {
                self.criteria.categories = self
                    .dataset
                    .as_deref()
                    .map(all_categories)
                    .unwrap_or_default();
            }
            Command::SelectNoCategories => self.criteria.categories.clear(),
            Command::SetDateStart(start) => {
                if let Some(range) = self.criteria.date_range.as_mut() {
                    range.start = start;
                }
            }
            Command::SetDateEnd(end) => {
                if let Some(range) = self.criteria.date_range.as_mut() {
                    range.end = end;
                }
            }
            Command::ResetDateRange => self.criteria.date_range = self.date_bounds,
        }
        self.recompute();
    }

    /// Recompute the filtered view and every chart's data.
    pub fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.views = None;
            return;
        };

        match build_views(dataset, &self.criteria) {
            Ok(views) => {
                self.views = Some(views);
                self.filter_error = None;
            }
            Err(e) => {
                log::warn!("Filtering failed: {e}");
                self.views = None;
                self.filter_error = Some(e);
            }
        }
    }

    /// Rows visible after filtering.
    pub fn visible_count(&self) -> usize {
        self.views.as_ref().map_or(0, |v| v.filtered.len())
    }
}
