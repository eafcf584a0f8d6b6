/// One view's worth of list state: filter, remembered paging offset, and
/// selection.
///
/// The list owns the selection engine and the offset for the result set it
/// currently shows; `refresh` re-derives everything from the store whenever
/// the filter or the underlying data may have changed.
use anyhow::Result;
use chrono::Local;

use crate::filter::{self, DateFilter, DateRange};
use crate::paging;
use crate::selection::SelectionEngine;
use crate::session::{PracticeSession, SessionId};
use crate::store::SessionDb;
use crate::timeunit::Day;

pub struct SessionList {
    filter: DateFilter,
    offset: usize,
    page_size: usize,
    selection: SelectionEngine,
}

/// The materialized state handed to rendering after a refresh.
#[derive(Debug, serde::Serialize)]
pub struct ListPage {
    pub sessions: Vec<PracticeSession>,
    pub range: DateRange,
    pub offset: usize,
    pub total: usize,
}

impl SessionList {
    pub fn new(page_size: usize) -> Self {
        SessionList {
            filter: DateFilter::default(),
            offset: 0,
            page_size,
            selection: SelectionEngine::new(0),
        }
    }

    /// Replaces the filter; the remembered offset is meaningless for a new
    /// result set and goes back to the top.
    pub fn set_filter(&mut self, filter: DateFilter) {
        self.filter = filter;
        self.offset = 0;
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn selection(&mut self) -> &mut SelectionEngine {
        &mut self.selection
    }

    /// The interval the current filter resolves to. An empty store resolves
    /// against today on both ends, so an unfiltered fresh store still yields
    /// a valid (single-day) range.
    pub fn resolved_range(&self, db: &SessionDb, today: Day) -> Result<DateRange> {
        let (first, last) = db.bounds()?.unwrap_or((today, today));
        Ok(filter::resolve(&self.filter, first, last, today))
    }

    /// Reload against the store: resolve the range, clamp the remembered
    /// offset to the new count, reset the selection for the new result set,
    /// and fetch the current page.
    pub fn refresh(&mut self, db: &SessionDb) -> Result<ListPage> {
        self.refresh_at(db, Day::today_in(&Local))
    }

    /// `refresh` with an explicit "today", for deterministic use in tests.
    pub fn refresh_at(&mut self, db: &SessionDb, today: Day) -> Result<ListPage> {
        let range = self.resolved_range(db, today)?;
        let total = db.count_in(&range)?;
        self.offset = paging::safe_offset(self.offset, self.page_size, total);
        self.selection.reset(total);
        let sessions = db.page_in(&range, self.offset, self.page_size)?;
        Ok(ListPage {
            sessions,
            range,
            offset: self.offset,
            total,
        })
    }

    /// Materializes the current selection into concrete row ids for `range`.
    /// The engine only knows membership; the id universe comes from the
    /// store.
    pub fn selected_ids(&self, db: &SessionDb, range: &DateRange) -> Result<Vec<SessionId>> {
        if !self.selection.is_active() {
            return Ok(Vec::new());
        }
        let ids = db.ids_in(range)?;
        Ok(self.selection.selected_from(ids))
    }
}
