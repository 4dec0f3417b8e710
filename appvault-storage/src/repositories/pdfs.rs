use crate::entity_store::EntityStore;
use crate::error::StorageResult;
use crate::kv::KeyValueStore;
use crate::search::{filter_records, RecordQuery};
use appvault_types::{new_record_id, Clock, CreatePdfRequest, Pdf, PdfCategory, UpdatePdfRequest};
use std::sync::Arc;
use tracing::info;

/// PDF documents with their file payload stored inline.
#[derive(Clone)]
pub struct PdfRepository {
    store: EntityStore<Pdf>,
    clock: Arc<dyn Clock>,
}

impl PdfRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: EntityStore::new(kv),
            clock,
        }
    }

    pub fn list(&self) -> Vec<Pdf> {
        self.store.load_all()
    }

    pub fn get(&self, id: &str) -> Option<Pdf> {
        self.store.get(id)
    }

    pub fn create(&self, request: CreatePdfRequest) -> StorageResult<Pdf> {
        request.validate()?;
        let pdf = request.into_pdf(new_record_id(), self.clock.now())?;
        let pdf = self.store.add(pdf)?;
        info!(pdf_id = %pdf.id, file_name = %pdf.file_name, size = %pdf.file_size, "PDF stored");
        Ok(pdf)
    }

    /// Edits metadata; the stored file is kept as uploaded.
    pub fn update(&self, id: &str, request: UpdatePdfRequest) -> StorageResult<Pdf> {
        request.validate()?;
        self.store.update(id, |pdf| request.apply(pdf))
    }

    pub fn delete(&self, id: &str) -> StorageResult<Pdf> {
        let removed = self.store.delete(id)?;
        info!(pdf_id = %id, "PDF deleted");
        Ok(removed)
    }

    pub fn search(&self, query: &RecordQuery<PdfCategory>) -> Vec<Pdf> {
        filter_records(self.list(), query)
    }
}
