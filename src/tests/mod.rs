use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::loader::Loader;
use crate::model::{Record, RecordPage, RecordRef, TypeRef};
use crate::output::{self, OutputFormat, RenderOptions};
use crate::source::{CatalogOptions, DataSource, SourceError};
use crate::viewmodel::{Direction, ViewModel, PAGE_SIZE};

/// In-memory catalog keyed by detail URL.
struct MemorySource {
    types: Vec<String>,
    order: Vec<String>,
    details: HashMap<String, Record>,
}

impl MemorySource {
    fn new(types: &[&str], records: Vec<Record>) -> Self {
        let order = records.iter().map(|r| format!("mem://pokemon/{}", r.id)).collect();
        let details = records
            .into_iter()
            .map(|r| (format!("mem://pokemon/{}", r.id), r))
            .collect();
        Self {
            types: types.iter().map(|t| t.to_string()).collect(),
            order,
            details,
        }
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch_type_list(&self) -> Result<Vec<TypeRef>, SourceError> {
        Ok(self
            .types
            .iter()
            .map(|name| TypeRef { name: name.clone() })
            .collect())
    }

    async fn fetch_record_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<RecordPage, SourceError> {
        let results = self
            .order
            .iter()
            .skip(offset)
            .take(limit)
            .map(|url| RecordRef {
                name: String::new(),
                url: url.clone(),
            })
            .collect();
        Ok(RecordPage {
            count: self.order.len(),
            results,
        })
    }

    async fn fetch_record_detail(&self, url: &str) -> Result<Record, SourceError> {
        self.details
            .get(url)
            .cloned()
            .ok_or_else(|| SourceError::DetailFetch {
                url: url.to_string(),
                message: "status 404".to_string(),
            })
    }
}

fn mon(id: u32, kind: &str, height: u32, weight: u32) -> Record {
    Record {
        id,
        name: format!("mon-{id}"),
        height_units: height,
        weight_units: weight,
        primary_type_name: kind.to_string(),
        sprite_url: format!("https://sprites/{id}.png"),
    }
}

async fn load(source: MemorySource, limit: usize) -> ViewModel {
    let mut vm = ViewModel::new();
    let catalog = CatalogOptions {
        limit,
        ..Default::default()
    };
    Loader::new(Arc::new(source), catalog)
        .load(&mut vm)
        .await
        .unwrap();
    vm
}

#[tokio::test]
async fn forty_five_matches_paginate_into_three_pages() {
    let mut records: Vec<Record> = (1..=45).map(|i| mon(i, "water", 10, 100)).collect();
    records.extend((46..=60).map(|i| mon(i, "fire", 10, 100)));
    let mut vm = load(MemorySource::new(&["water", "fire"], records), 200).await;

    vm.set_type_filter("water").unwrap();
    let mut sizes = Vec::new();
    loop {
        let snap = vm.snapshot();
        assert_eq!(snap.total_pages, 3);
        assert!(snap.page_slice.len() <= PAGE_SIZE);
        sizes.push(snap.page_slice.len());
        if !vm.turn_page(Direction::Forward) {
            break;
        }
    }
    assert_eq!(sizes, vec![20, 20, 5]);
    assert_eq!(vm.page_state().page_index, 2);

    vm.set_height_range(0, 20).unwrap();
    assert_eq!(vm.page_state().page_index, 0);
}

#[tokio::test]
async fn limit_caps_the_catalog() {
    let records: Vec<Record> = (1..=30).map(|i| mon(i, "bug", 3, 30)).collect();
    let vm = load(MemorySource::new(&["bug"], records), 12).await;
    let snap = vm.snapshot();
    assert_eq!(snap.total_records, 12);
    assert_eq!(snap.total_pages, 1);
    let ids: Vec<u32> = snap.page_slice.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<u32>>());
}

#[tokio::test]
async fn missing_detail_fails_whole_page() {
    let mut source = MemorySource::new(
        &["grass"],
        vec![mon(1, "grass", 7, 69), mon(2, "grass", 10, 130)],
    );
    source.order.push("mem://pokemon/999".to_string());
    let vm = load(source, 200).await;

    let snap = vm.snapshot();
    assert!(!snap.loading);
    assert!(snap.page_slice.is_empty());
    assert_eq!(
        snap.error,
        Some("Failed to fetch Pokémon details from mem://pokemon/999: status 404")
    );

    let bytes = output::render(&snap, OutputFormat::Json, &RenderOptions::default());
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        json["error"],
        "Failed to fetch Pokémon details from mem://pokemon/999: status 404"
    );
}

#[tokio::test]
async fn combined_filters_render_matching_cards() {
    let records = vec![
        mon(1, "grass", 7, 69),
        mon(4, "fire", 6, 85),
        mon(5, "fire", 11, 190),
        mon(6, "fire", 17, 905),
    ];
    let mut vm = load(MemorySource::new(&["grass", "fire"], records), 200).await;
    vm.set_type_filter("fire").unwrap();
    vm.set_weight_range(0, 200).unwrap();

    let opts = RenderOptions {
        color: false,
        ..Default::default()
    };
    let text =
        String::from_utf8(output::render(&vm.snapshot(), OutputFormat::Text, &opts)).unwrap();
    assert!(text.contains("2 match"));
    assert!(text.contains("#4 "));
    assert!(text.contains("#5 "));
    assert!(!text.contains("#6 "));
    assert!(!text.contains("#1 "));
    assert!(text.contains("Page 1 of 1"));
}
