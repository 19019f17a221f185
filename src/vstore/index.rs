use super::schema::{AttributeSet, FileRecord};

/// Extension appended when an import row names a file without it.
const IMPLIED_EXTENSION: &str = ".pdf";

/// In-memory mirror of the selected vector store's file list.
///
/// Replaced wholesale on refresh; otherwise only mutated to mirror a
/// confirmed remote update or delete.
#[derive(Debug, Default)]
pub struct FileIndex {
    records: Vec<FileRecord>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record with a freshly fetched list.
    pub fn replace_all(&mut self, records: Vec<FileRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a file record by ID.
    pub fn get(&self, id: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find the record an import row refers to.
    ///
    /// Matches `filename` or `name` exactly, then retries both with `.pdf`
    /// appended to the row's name.
    pub fn find_by_name(&self, name: &str) -> Option<&FileRecord> {
        self.find_named(name)
            .or_else(|| self.find_named(&format!("{name}{IMPLIED_EXTENSION}")))
    }

    fn find_named(&self, name: &str) -> Option<&FileRecord> {
        self.records
            .iter()
            .find(|r| r.filename == name || r.name.as_deref() == Some(name))
    }

    /// Mirror a confirmed attribute update. Returns false if the id is unknown.
    pub fn replace_attributes(&mut self, id: &str, attributes: AttributeSet) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.attributes = attributes;
                true
            }
            None => false,
        }
    }

    /// Mirror a confirmed delete. Returns the removed record, if any.
    pub fn remove(&mut self, id: &str) -> Option<FileRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    /// Mirror a confirmed upload.
    pub fn insert(&mut self, record: FileRecord) {
        self.records.push(record);
    }
}
