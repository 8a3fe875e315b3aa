use std::sync::Arc;

use indicatif::ProgressBar;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task;
use tokio::time::Instant;

use crate::model::Record;
use crate::source::{self, CatalogOptions, DataSource, SourceError};
use crate::viewmodel::ViewModel;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("{what} task ended without reporting: {source}")]
    TaskJoin {
        what: &'static str,
        #[source]
        source: task::JoinError,
    },
}

/// Result of one of the two ingestion tasks.
#[derive(Debug)]
pub enum Ingest {
    Types(Result<Vec<String>, SourceError>),
    Records(Result<Vec<Record>, SourceError>),
}

#[derive(Clone, Debug)]
pub struct LoadSummary {
    pub records: usize,
    pub types: usize,
    pub elapsed: std::time::Duration,
    pub failed: bool,
}

pub struct Loader {
    source: Arc<dyn DataSource>,
    catalog: CatalogOptions,
    pb: ProgressBar,
}

impl Loader {
    pub fn new(source: Arc<dyn DataSource>, catalog: CatalogOptions) -> Self {
        Self {
            source,
            catalog,
            pb: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, pb: ProgressBar) -> Self {
        self.pb = pb;
        self
    }

    /// Starts both fetches and applies their results to `vm` as they land.
    ///
    /// Returns after both results are applied or after the first failure;
    /// a task still running at that point is left to finish unobserved.
    pub async fn load(self, vm: &mut ViewModel) -> Result<LoadSummary, LoaderError> {
        let started_at = Instant::now();
        let (tx, mut rx) = mpsc::channel::<Ingest>(2);

        let types_source = Arc::clone(&self.source);
        let types_tx = tx.clone();
        let types_handle = task::spawn(async move {
            let result = types_source
                .fetch_type_list()
                .await
                .map(|list| list.into_iter().map(|t| t.name).collect());
            let _ = types_tx.send(Ingest::Types(result)).await;
        });

        let records_source = Arc::clone(&self.source);
        let records_tx = tx;
        let catalog = self.catalog;
        let pb = self.pb.clone();
        let records_handle = task::spawn(async move {
            let result = source::fetch_catalog(records_source.as_ref(), catalog, pb).await;
            let _ = records_tx.send(Ingest::Records(result)).await;
        });

        let mut pending = 2usize;
        let mut failed = false;
        while pending > 0 {
            let Some(event) = rx.recv().await else {
                break;
            };
            pending -= 1;
            if let Err(message) = apply(vm, event) {
                tracing::warn!(%message, "ingestion failed");
                self.pb.finish_and_clear();
                failed = true;
                break;
            }
        }

        if !failed && pending > 0 {
            // Both senders dropped without reporting: one of the tasks panicked.
            if let Err(e) = types_handle.await {
                return Err(LoaderError::TaskJoin {
                    what: "type list",
                    source: e,
                });
            }
            if let Err(e) = records_handle.await {
                return Err(LoaderError::TaskJoin {
                    what: "record catalog",
                    source: e,
                });
            }
        }

        let summary = LoadSummary {
            records: vm.records().len(),
            types: vm.type_options().len(),
            elapsed: started_at.elapsed(),
            failed,
        };
        tracing::info!(
            records = summary.records,
            types = summary.types,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            failed,
            "ingestion finished"
        );
        Ok(summary)
    }
}

/// Writes one ingestion result into the view model, returning the stored
/// error message on failure.
pub fn apply(vm: &mut ViewModel, event: Ingest) -> Result<(), String> {
    match event {
        Ingest::Types(Ok(names)) => {
            vm.ingest_types(names);
            Ok(())
        }
        Ingest::Records(Ok(records)) => {
            vm.ingest_records(records);
            Ok(())
        }
        Ingest::Types(Err(e)) | Ingest::Records(Err(e)) => {
            let message = e.to_string();
            vm.fail(message.clone());
            Err(message)
        }
    }
}
