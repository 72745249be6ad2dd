//! Tag and record editors.
//!
//! Every tag and record gets a UUID when it is added and is removed by that
//! UUID, so a stale handle can never remove a neighbouring entry. Duplicate
//! detection is an exact, case-sensitive string match.

use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::domain::user::{CertificationRecord, EducationRecord, LanguageRecord};
use crate::domain::Proficiency;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Uuid,
    pub value: String,
}

/// Insertion-ordered set of unique strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` unless it is empty or already present.
    ///
    /// Returns the id of the new tag, `None` when nothing was added.
    pub fn add(&mut self, value: impl Into<String>) -> Option<Uuid> {
        let value = value.into();
        if value.is_empty() || self.contains(&value) {
            return None;
        }
        let id = Uuid::new_v4();
        self.tags.push(Tag { id, value });
        Some(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Tag> {
        let pos = self.tags.iter().position(|t| t.id == id)?;
        Some(self.tags.remove(pos))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.tags.iter().any(|t| t.value == value)
    }

    pub fn id_of(&self, value: &str) -> Option<Uuid> {
        self.tags.iter().find(|t| t.value == value).map(|t| t.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn values(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.value.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for value in iter {
            set.add(value);
        }
        set
    }
}

/// Serializes as a plain JSON array of the tag values.
impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tags.iter().map(|t| &t.value))
    }
}

/// Staging input paired with the set it feeds.
#[derive(Debug, Clone, Default)]
pub struct TagEditor {
    pub input: String,
    pub tags: TagSet,
}

impl TagEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Moves the staged value into the set. The input is cleared only when
    /// the value was actually added.
    pub fn commit(&mut self) -> Option<Uuid> {
        let id = self.tags.add(self.input.clone())?;
        self.input.clear();
        Some(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Tag> {
        self.tags.remove(id)
    }
}

/// Toggle-chip selection over a fixed option list, in click order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<T> {
    selected: Vec<T>,
}

impl<T> Default for SelectionSet<T> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
        }
    }
}

impl<T: Copy + PartialEq> SelectionSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `value` if absent, deselects it if present. Returns whether it
    /// is selected afterwards.
    pub fn toggle(&mut self, value: T) -> bool {
        if let Some(pos) = self.selected.iter().position(|v| *v == value) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(value);
            true
        }
    }

    pub fn select(&mut self, value: T) {
        if !self.contains(value) {
            self.selected.push(value);
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.selected.contains(&value)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }
}

impl<T: Copy + PartialEq> FromIterator<T> for SelectionSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for value in iter {
            set.select(value);
        }
        set
    }
}

impl<T: Serialize> Serialize for SelectionSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.selected)
    }
}

/// A structured entry staged field by field before it is committed.
pub trait StagedRecord: Default + Clone {
    /// The committed, wire-level form of the record.
    type Output: Serialize + Clone;

    /// Whether the required fields are filled in.
    fn is_complete(&self) -> bool;

    fn finish(&self) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<T> {
    pub id: Uuid,
    pub record: T,
}

/// Ordered list of committed records, each with a stable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordList<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> RecordList<T> {
    pub fn push(&mut self, record: T) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(Entry { id, record });
        id
    }

    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<T> for RecordList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = RecordList::default();
        for record in iter {
            list.push(record);
        }
        list
    }
}

/// Serializes the records only; ids stay client-side.
impl<T: Serialize> Serialize for RecordList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records())
    }
}

/// Staging record paired with the list it feeds.
#[derive(Debug, Clone)]
pub struct RecordEditor<S: StagedRecord> {
    pub staging: S,
    pub records: RecordList<S::Output>,
}

impl<S: StagedRecord> Default for RecordEditor<S> {
    fn default() -> Self {
        Self {
            staging: S::default(),
            records: RecordList::default(),
        }
    }
}

impl<S: StagedRecord> RecordEditor<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits the staged record when its required fields are set, then
    /// resets the staging fields.
    pub fn commit(&mut self) -> Option<Uuid> {
        if !self.staging.is_complete() {
            return None;
        }
        let id = self.records.push(self.staging.finish());
        self.staging = S::default();
        Some(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<S::Output> {
        self.records.remove(id)
    }
}

/// Certification staging fields; name and organization are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificationInput {
    pub name: String,
    pub organization: String,
    pub date: String,
}

impl StagedRecord for CertificationInput {
    type Output = CertificationRecord;

    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.organization.is_empty()
    }

    fn finish(&self) -> CertificationRecord {
        CertificationRecord {
            name: self.name.clone(),
            organization: self.organization.clone(),
            date: self.date.clone(),
        }
    }
}

/// Language staging fields; both are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageInput {
    pub language: String,
    pub proficiency: Option<Proficiency>,
}

impl StagedRecord for LanguageInput {
    type Output = LanguageRecord;

    fn is_complete(&self) -> bool {
        !self.language.is_empty() && self.proficiency.is_some()
    }

    fn finish(&self) -> LanguageRecord {
        LanguageRecord {
            language: self.language.clone(),
            proficiency: self
                .proficiency
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Education staging fields; degree and institution are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationInput {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

impl StagedRecord for EducationInput {
    type Output = EducationRecord;

    fn is_complete(&self) -> bool {
        !self.degree.is_empty() && !self.institution.is_empty()
    }

    fn finish(&self) -> EducationRecord {
        EducationRecord {
            degree: self.degree.clone(),
            institution: self.institution.clone(),
            year: self.year.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_tag_added_once() {
        let mut editor = TagEditor::new();
        editor.set_input("Python");
        assert!(editor.commit().is_some());
        assert!(editor.input.is_empty());

        editor.set_input("Python");
        assert!(editor.commit().is_none());
        assert_eq!(editor.input, "Python");
        assert_eq!(editor.tags.values(), vec!["Python"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut set = TagSet::new();
        set.add("rust");
        set.add("Rust");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_value_ignored() {
        let mut set = TagSet::new();
        assert_eq!(set.add(""), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_by_id_survives_earlier_removals() {
        let mut set: TagSet = ["a", "b", "c"].into_iter().collect();
        let a = set.id_of("a").unwrap();
        let c = set.id_of("c").unwrap();

        assert_eq!(set.remove(a).unwrap().value, "a");
        // A positional index for "c" would now be stale; the id is not.
        assert_eq!(set.remove(c).unwrap().value, "c");
        assert_eq!(set.values(), vec!["b"]);
        assert!(set.remove(c).is_none());
    }

    #[test]
    fn test_tagset_serializes_as_string_array() {
        let set: TagSet = ["Go", "Rust"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["Go","Rust"]"#);
    }

    #[test]
    fn test_selection_toggle() {
        let mut modes = SelectionSet::new();
        assert!(modes.toggle(crate::domain::WorkMode::Remote));
        assert!(modes.toggle(crate::domain::WorkMode::OnSite));
        assert!(!modes.toggle(crate::domain::WorkMode::Remote));
        assert_eq!(serde_json::to_string(&modes).unwrap(), r#"["On-site"]"#);
    }

    #[test]
    fn test_certification_requires_name_and_organization() {
        let mut editor: RecordEditor<CertificationInput> = RecordEditor::new();
        editor.staging.name = "AWS SAA".to_string();
        assert!(editor.commit().is_none());

        editor.staging.organization = "Amazon".to_string();
        let id = editor.commit().unwrap();
        assert_eq!(editor.staging, CertificationInput::default());
        assert_eq!(editor.records.len(), 1);

        let json = serde_json::to_value(&editor.records).unwrap();
        assert_eq!(json, serde_json::json!([{"name": "AWS SAA", "organization": "Amazon", "date": ""}]));

        assert!(editor.remove(id).is_some());
        assert!(editor.records.is_empty());
    }

    #[test]
    fn test_language_requires_proficiency() {
        let mut editor: RecordEditor<LanguageInput> = RecordEditor::new();
        editor.staging.language = "German".to_string();
        assert!(editor.commit().is_none());

        editor.staging.proficiency = Some(Proficiency::Advanced);
        editor.commit().unwrap();
        let first = editor.records.records().next().unwrap();
        assert_eq!(first.proficiency, "Advanced");
    }

    #[test]
    fn test_education_year_optional() {
        let mut editor: RecordEditor<EducationInput> = RecordEditor::new();
        editor.staging.degree = "BSc".to_string();
        editor.staging.institution = "MIT".to_string();
        assert!(editor.commit().is_some());
        assert_eq!(editor.records.records().next().unwrap().year, "");
    }
}
