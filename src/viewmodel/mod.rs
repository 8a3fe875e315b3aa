mod filters;

pub use filters::{FilterConfig, FilterError, ValueRange, HEIGHT_BOUNDS, WEIGHT_BOUNDS};

use serde::Serialize;

use crate::model::Record;

pub const PAGE_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: PAGE_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn from_step(step: i64) -> Option<Self> {
        match step {
            1 => Some(Self::Forward),
            -1 => Some(Self::Backward),
            _ => None,
        }
    }
}

/// Stable filter: keeps every record satisfying `config`, in input order.
pub fn apply_filter<'a>(records: &'a [Record], config: &FilterConfig) -> Vec<&'a Record> {
    records.iter().filter(|r| config.matches(r)).collect()
}

/// Returns the slice for `page.page_index` and the total page count.
/// Out-of-range pages yield an empty slice.
pub fn paginate<'a, T>(filtered: &'a [T], page: &PageState) -> (&'a [T], usize) {
    if page.page_size == 0 {
        return (&[], 0);
    }
    let total_pages = filtered.len().div_ceil(page.page_size);
    let start = page.page_index.saturating_mul(page.page_size);
    if start >= filtered.len() {
        return (&[], total_pages);
    }
    let end = start.saturating_add(page.page_size).min(filtered.len());
    (&filtered[start..end], total_pages)
}

/// What the rendering side reads after every state change.
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub page_slice: Vec<&'a Record>,
    pub total_pages: usize,
    pub current_page_index: usize,
    pub type_options: &'a [String],
    pub filter: &'a FilterConfig,
    pub matched: usize,
    pub total_records: usize,
}

#[derive(Debug)]
pub struct ViewModel {
    records: Vec<Record>,
    records_ingested: bool,
    type_options: Vec<String>,
    types_ingested: bool,
    filter: FilterConfig,
    page: PageState,
    loading: bool,
    error: Option<String>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            records_ingested: false,
            type_options: Vec::new(),
            types_ingested: false,
            filter: FilterConfig::default(),
            page: PageState::default(),
            loading: true,
            error: None,
        }
    }

    /// Takes ownership of the record set. Only the first ingestion counts.
    pub fn ingest_records(&mut self, records: Vec<Record>) {
        if self.error.is_some() {
            tracing::debug!(count = records.len(), "record set arrived after error, ignored");
            return;
        }
        if self.records_ingested {
            tracing::warn!("record set already ingested, ignoring second ingestion");
            return;
        }
        self.records = records;
        self.records_ingested = true;
        self.loading = false;
    }

    pub fn ingest_types(&mut self, names: Vec<String>) {
        if self.error.is_some() {
            tracing::debug!(count = names.len(), "type list arrived after error, ignored");
            return;
        }
        if self.types_ingested {
            tracing::warn!("type list already ingested, ignoring second ingestion");
            return;
        }
        self.type_options = names;
        self.types_ingested = true;
    }

    /// Enters the terminal error state. The first message wins.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.error.is_some() {
            return;
        }
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Replaces the whole filter and returns to the first page. A config
    /// with a bad range or a type outside the options leaves state as is.
    pub fn set_filter(&mut self, config: FilterConfig) -> Result<(), FilterError> {
        config.validate()?;
        if !config.type_name.is_empty() && !self.type_options.contains(&config.type_name) {
            return Err(FilterError::UnknownType {
                name: config.type_name,
            });
        }
        self.commit_filter(config);
        Ok(())
    }

    fn commit_filter(&mut self, config: FilterConfig) {
        self.filter = config;
        self.page.page_index = 0;
    }

    pub fn set_type_filter(&mut self, name: &str) -> Result<(), FilterError> {
        let name = name.trim().to_lowercase();
        let type_name = if name.is_empty() || name == "all" {
            String::new()
        } else if self.type_options.iter().any(|t| *t == name) {
            name
        } else {
            return Err(FilterError::UnknownType { name });
        };
        self.commit_filter(FilterConfig {
            type_name,
            ..self.filter.clone()
        });
        Ok(())
    }

    pub fn set_height_range(&mut self, min: u32, max: u32) -> Result<(), FilterError> {
        let height_range = ValueRange::bounded(min, max, HEIGHT_BOUNDS, "height")?;
        self.commit_filter(FilterConfig {
            height_range,
            ..self.filter.clone()
        });
        Ok(())
    }

    pub fn set_weight_range(&mut self, min: u32, max: u32) -> Result<(), FilterError> {
        let weight_range = ValueRange::bounded(min, max, WEIGHT_BOUNDS, "weight")?;
        self.commit_filter(FilterConfig {
            weight_range,
            ..self.filter.clone()
        });
        Ok(())
    }

    pub fn reset(&mut self) {
        self.commit_filter(FilterConfig::default());
    }

    /// Moves one page; returns whether the page index changed.
    pub fn turn_page(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => {
                if self.page.page_index + 1 < self.total_pages() {
                    self.page.page_index += 1;
                    return true;
                }
            }
            Direction::Backward => {
                if self.page.page_index > 0 {
                    self.page.page_index -= 1;
                    return true;
                }
            }
        }
        false
    }

    pub fn filtered(&self) -> Vec<&Record> {
        apply_filter(&self.records, &self.filter)
    }

    pub fn total_pages(&self) -> usize {
        let filtered = self.filtered();
        paginate(&filtered, &self.page).1
    }

    /// In the error state the snapshot carries the message and no content.
    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let filtered = if self.error.is_some() {
            Vec::new()
        } else {
            self.filtered()
        };
        let (slice, total_pages) = paginate(&filtered, &self.page);
        ViewSnapshot {
            loading: self.loading,
            error: self.error.as_deref(),
            page_slice: slice.to_vec(),
            total_pages,
            current_page_index: self.page.page_index,
            type_options: &self.type_options,
            filter: &self.filter,
            matched: filtered.len(),
            total_records: self.records.len(),
        }
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn type_options(&self) -> &[String] {
        &self.type_options
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, kind: &str, height: u32, weight: u32) -> Record {
        Record {
            id,
            name: format!("mon-{id}"),
            height_units: height,
            weight_units: weight,
            primary_type_name: kind.to_string(),
            sprite_url: String::new(),
        }
    }

    fn many(n: u32) -> Vec<Record> {
        (1..=n).map(|i| record(i, "normal", 5, 50)).collect()
    }

    fn loaded(records: Vec<Record>) -> ViewModel {
        let mut vm = ViewModel::new();
        vm.ingest_types(vec!["normal".into(), "fire".into(), "grass".into()]);
        vm.ingest_records(records);
        vm
    }

    #[test]
    fn default_filter_is_identity() {
        let records = vec![
            record(3, "fire", 0, 0),
            record(1, "grass", 20, 1000),
            record(2, "", 10, 500),
        ];
        let out = apply_filter(&records, &FilterConfig::default());
        let ids: Vec<u32> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn record_passes_only_when_all_predicates_hold() {
        let cfg = FilterConfig {
            type_name: "fire".into(),
            height_range: ValueRange { min: 2, max: 10 },
            weight_range: ValueRange { min: 10, max: 100 },
        };
        let records = vec![
            record(1, "fire", 5, 50),
            record(2, "water", 5, 50),
            record(3, "fire", 11, 50),
            record(4, "fire", 5, 101),
            record(5, "fire", 2, 10),
        ];
        for r in records.iter() {
            let expected = (r.primary_type_name == "fire")
                && (2..=10).contains(&r.height_units)
                && (10..=100).contains(&r.weight_units);
            assert_eq!(cfg.matches(r), expected, "record {}", r.id);
        }
        let ids: Vec<u32> = apply_filter(&records, &cfg).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn grass_filter_keeps_only_grass_record() {
        let records = vec![record(4, "fire", 6, 85), record(1, "grass", 7, 69)];
        let cfg = FilterConfig {
            type_name: "grass".into(),
            ..Default::default()
        };
        let out = apply_filter(&records, &cfg);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn exact_height_range_selects_single_height() {
        let records = vec![
            record(1, "normal", 5, 1),
            record(2, "normal", 7, 1),
            record(3, "normal", 9, 1),
        ];
        let cfg = FilterConfig {
            height_range: ValueRange { min: 7, max: 7 },
            ..Default::default()
        };
        let ids: Vec<u32> = apply_filter(&records, &cfg).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn forty_five_records_make_three_pages() {
        let items: Vec<u32> = (0..45).collect();
        let mut page = PageState::default();
        let mut lens = Vec::new();
        let (_, total) = paginate(&items, &page);
        assert_eq!(total, 3);
        for i in 0..total {
            page.page_index = i;
            let (slice, _) = paginate(&items, &page);
            assert!(slice.len() <= PAGE_SIZE);
            lens.push(slice.len());
        }
        assert_eq!(lens, vec![20, 20, 5]);
        assert_eq!(lens.iter().sum::<usize>(), items.len());
    }

    #[test]
    fn paginate_empty_and_out_of_range() {
        let empty: Vec<u32> = Vec::new();
        assert_eq!(paginate(&empty, &PageState::default()), (&[][..], 0));

        let items: Vec<u32> = (0..40).collect();
        let page = PageState {
            page_index: 2,
            page_size: PAGE_SIZE,
        };
        let (slice, total) = paginate(&items, &page);
        assert_eq!(total, 2);
        assert!(slice.is_empty());

        let far = PageState {
            page_index: usize::MAX,
            page_size: PAGE_SIZE,
        };
        assert!(paginate(&items, &far).0.is_empty());
    }

    #[test]
    fn turn_page_stops_at_both_ends() {
        let mut vm = loaded(many(45));
        assert!(!vm.turn_page(Direction::Backward));
        assert_eq!(vm.page_state().page_index, 0);

        assert!(vm.turn_page(Direction::Forward));
        assert!(vm.turn_page(Direction::Forward));
        assert_eq!(vm.page_state().page_index, 2);
        assert!(!vm.turn_page(Direction::Forward));
        assert_eq!(vm.page_state().page_index, 2);
        assert_eq!(vm.snapshot().page_slice.len(), 5);
    }

    #[test]
    fn turn_page_is_noop_without_matches() {
        let mut vm = loaded(Vec::new());
        assert!(!vm.turn_page(Direction::Forward));
        assert_eq!(vm.page_state().page_index, 0);
    }

    #[test]
    fn set_filter_resets_page_index() {
        let mut vm = loaded(many(60));
        vm.turn_page(Direction::Forward);
        vm.turn_page(Direction::Forward);
        assert_eq!(vm.page_state().page_index, 2);

        vm.set_filter(vm.filter().clone()).unwrap();
        assert_eq!(vm.page_state().page_index, 0);

        vm.turn_page(Direction::Forward);
        vm.set_weight_range(0, 1000).unwrap();
        assert_eq!(vm.page_state().page_index, 0);
    }

    #[test]
    fn rejected_intents_leave_state_untouched() {
        let mut vm = loaded(many(60));
        vm.turn_page(Direction::Forward);
        assert!(vm.set_height_range(8, 2).is_err());
        assert!(vm.set_weight_range(0, 5000).is_err());
        assert_eq!(
            vm.set_type_filter("shadowless"),
            Err(FilterError::UnknownType {
                name: "shadowless".into()
            })
        );
        assert_eq!(vm.page_state().page_index, 1);
        assert!(vm.filter().is_unconstrained());
    }

    #[test]
    fn set_filter_rejects_out_of_bounds_and_inverted_ranges() {
        let mut vm = loaded(vec![record(1, "fire", 5, 50), record(2, "fire", 50, 50)]);
        vm.set_type_filter("fire").unwrap();
        let before = vm.filter().clone();

        let too_tall = FilterConfig {
            height_range: ValueRange { min: 0, max: 100 },
            ..Default::default()
        };
        assert_eq!(
            vm.set_filter(too_tall),
            Err(FilterError::OutOfBounds {
                label: "height",
                min: 0,
                max: 100,
                lower: 0,
                upper: 20,
            })
        );

        let inverted = FilterConfig {
            height_range: ValueRange { min: 9, max: 3 },
            ..Default::default()
        };
        assert_eq!(
            vm.set_filter(inverted),
            Err(FilterError::InvertedRange {
                label: "height",
                min: 9,
                max: 3,
            })
        );

        let heavy = FilterConfig {
            weight_range: ValueRange { min: 0, max: 1001 },
            ..Default::default()
        };
        assert!(vm.set_filter(heavy).is_err());

        let unknown = FilterConfig {
            type_name: "shadow".into(),
            ..Default::default()
        };
        assert!(vm.set_filter(unknown).is_err());

        assert_eq!(vm.filter(), &before);
        assert_eq!(vm.snapshot().matched, 1);
    }

    #[test]
    fn set_filter_keeps_page_when_rejected() {
        let mut vm = loaded(many(60));
        vm.turn_page(Direction::Forward);
        let bad = FilterConfig {
            weight_range: ValueRange { min: 500, max: 10 },
            ..Default::default()
        };
        assert!(vm.set_filter(bad).is_err());
        assert_eq!(vm.page_state().page_index, 1);
        assert!(vm.filter().is_unconstrained());
    }

    #[test]
    fn type_filter_normalizes_and_clears() {
        let mut vm = loaded(vec![record(1, "fire", 1, 1), record(2, "grass", 1, 1)]);
        vm.set_type_filter(" Fire ").unwrap();
        assert_eq!(vm.filter().type_name, "fire");
        assert_eq!(vm.snapshot().matched, 1);
        vm.set_type_filter("All").unwrap();
        assert_eq!(vm.filter().type_name, "");
        assert_eq!(vm.snapshot().matched, 2);
    }

    #[test]
    fn error_state_is_terminal() {
        let mut vm = ViewModel::new();
        assert!(vm.is_loading());
        vm.fail("Failed to fetch Pokémon list");
        vm.fail("second");
        vm.ingest_records(many(3));
        vm.ingest_types(vec!["fire".into()]);
        let snap = vm.snapshot();
        assert!(!snap.loading);
        assert_eq!(snap.error, Some("Failed to fetch Pokémon list"));
        assert!(snap.page_slice.is_empty());
        assert!(snap.type_options.is_empty());
    }

    #[test]
    fn failure_after_ingestion_hides_content() {
        let mut vm = loaded(many(25));
        assert_eq!(vm.snapshot().total_pages, 2);

        vm.fail("Failed to fetch type list: status 503");
        let snap = vm.snapshot();
        assert_eq!(snap.error, Some("Failed to fetch type list: status 503"));
        assert!(snap.page_slice.is_empty());
        assert_eq!(snap.total_pages, 0);
        assert_eq!(snap.matched, 0);
    }

    #[test]
    fn records_are_ingested_once() {
        let mut vm = loaded(many(3));
        vm.ingest_records(many(30));
        assert_eq!(vm.records().len(), 3);
    }

    #[test]
    fn direction_from_step() {
        assert_eq!(Direction::from_step(1), Some(Direction::Forward));
        assert_eq!(Direction::from_step(-1), Some(Direction::Backward));
        assert_eq!(Direction::from_step(2), None);
    }
}
