//! Per-process display state: what the user last searched, which view is
//! active, the unit toggles and the fetched records they apply to.
//!
//! Concurrent searches are sequenced: only the most recently started search
//! may write its outcome back. A search that settles after a newer one has
//! started is discarded.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dispatcher::{LocationQuery, SearchOutcome};
use crate::models::{CurrentConditions, ForecastResponse};
use crate::units::DisplayUnits;

// ---

/// Which panel the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Current,
    Forecast,
}

/// Contents of the current-conditions slot after a search settles.
#[derive(Debug, Clone)]
pub enum CurrentSlot {
    Loaded(Box<CurrentConditions>),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Session {
    // ---
    last_query: Option<LocationQuery>,
    latest_search: Option<Uuid>,
    pending: bool,
    view: ActiveView,
    units: DisplayUnits,
    current: Option<CurrentSlot>,
    forecast: Option<ForecastResponse>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a search and return its id.
    ///
    /// The view snaps back to current conditions regardless of what was
    /// selected before.
    pub fn begin_search(&mut self, query: LocationQuery) -> Uuid {
        // ---
        let id = Uuid::new_v4();
        self.last_query = Some(query);
        self.latest_search = Some(id);
        self.pending = true;
        self.view = ActiveView::Current;
        id
    }

    /// Apply a settled outcome if `search_id` is still the latest search.
    ///
    /// Returns `false` when the outcome is stale and was dropped.
    pub fn complete_search(&mut self, search_id: Uuid, outcome: SearchOutcome) -> bool {
        // ---
        if self.latest_search != Some(search_id) {
            return false;
        }

        self.pending = false;
        self.units = DisplayUnits::default();
        match outcome {
            SearchOutcome::Loaded { current, forecast } => {
                self.current = Some(CurrentSlot::Loaded(current));
                self.forecast = Some(*forecast);
            }
            SearchOutcome::Failed { reason } => {
                self.current = Some(CurrentSlot::Failed(reason));
                self.forecast = None;
            }
        }
        true
    }

    /// Abandon a search that never issued requests (e.g. rejected up front).
    pub fn cancel_search(&mut self, search_id: Uuid) {
        if self.latest_search == Some(search_id) {
            self.pending = false;
        }
    }

    pub fn set_view(&mut self, view: ActiveView) {
        self.view = view;
    }

    pub fn set_units(&mut self, units: DisplayUnits) {
        self.units = units;
    }

    pub fn has_searched(&self) -> bool {
        self.last_query.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn units(&self) -> DisplayUnits {
        self.units
    }

    pub fn current(&self) -> Option<&CurrentSlot> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> Option<&ForecastResponse> {
        self.forecast.as_ref()
    }
}
