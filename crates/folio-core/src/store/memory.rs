//! In-memory reference store.
//!
//! HashMap-backed implementation of every store trait, used by the pipeline
//! tests and as the reference semantics for adapters. Ids are per-table
//! counters starting at 1; enumeration follows insertion order.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::locale::LocalizedValues;
use crate::models::{
    Author, Galley, Issue, Journal, Publication, Role, Section, Submission, User, UserGroup,
    Vocabulary, WorkflowStage,
};
use crate::store::{
    AuthorStore, GalleyStore, IssueStore, JournalStore, PublicationStore, SectionStore,
    SubmissionStore, UserGroupStore, UserStore, VocabularyStore,
};

#[derive(Debug, Clone)]
struct StageAssignment {
    submission_id: i64,
    group_id: i64,
    user_id: i64,
}

#[derive(Default)]
struct Tables {
    next_id: BTreeMap<&'static str, i64>,
    issues: BTreeMap<i64, Issue>,
    sections: BTreeMap<i64, Section>,
    submissions: BTreeMap<i64, Submission>,
    publications: BTreeMap<i64, Publication>,
    authors: BTreeMap<i64, Author>,
    galleys: BTreeMap<i64, Galley>,
    vocabulary: BTreeMap<(i64, Vocabulary), LocalizedValues>,
    user_groups: BTreeMap<i64, UserGroup>,
    stage_assignments: Vec<StageAssignment>,
    journals: BTreeMap<i64, Journal>,
    users: BTreeMap<i64, User>,
}

impl Tables {
    fn assign_id(&mut self, table: &'static str) -> i64 {
        let next = self.next_id.entry(table).or_insert(1);
        let id = *next;
        *next += 1;
        id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue_count(&self) -> usize {
        self.tables.lock().unwrap().issues.len()
    }

    pub fn section_count(&self) -> usize {
        self.tables.lock().unwrap().sections.len()
    }

    pub fn submission_count(&self) -> usize {
        self.tables.lock().unwrap().submissions.len()
    }

    pub fn stage_assignment_count(&self) -> usize {
        self.tables.lock().unwrap().stage_assignments.len()
    }

    pub fn has_stage_assignment(&self, submission_id: i64, group_id: i64, user_id: i64) -> bool {
        self.tables
            .lock()
            .unwrap()
            .stage_assignments
            .iter()
            .any(|a| {
                a.submission_id == submission_id && a.group_id == group_id && a.user_id == user_id
            })
    }
}

impl IssueStore for MemoryStore {
    fn find_published_issue(
        &self,
        journal_id: i64,
        volume: i32,
        number: i32,
    ) -> Result<Option<Issue>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .issues
            .values()
            .find(|i| {
                i.journal_id == journal_id && i.volume == volume && i.number == number && i.published
            })
            .cloned())
    }

    fn insert_issue(&self, issue: &Issue) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("issues");
        let mut issue = issue.clone();
        issue.id = id;
        tables.issues.insert(id, issue);
        Ok(id)
    }

    fn update_issue(&self, issue: &Issue) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.issues.insert(issue.id, issue.clone());
        Ok(())
    }

    fn delete_issue(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.issues.remove(&id);
        Ok(())
    }
}

impl SectionStore for MemoryStore {
    fn find_section_by_title(
        &self,
        journal_id: i64,
        locale: &str,
        title: &str,
    ) -> Result<Option<Section>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .sections
            .values()
            .find(|s| s.journal_id == journal_id && s.title.get(locale) == Some(title))
            .cloned())
    }

    fn insert_section(&self, section: &Section) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("sections");
        let mut section = section.clone();
        section.id = id;
        tables.sections.insert(id, section);
        Ok(id)
    }

    fn delete_section(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.sections.remove(&id);
        Ok(())
    }
}

impl SubmissionStore for MemoryStore {
    fn insert_submission(&self, submission: &Submission) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("submissions");
        let mut submission = submission.clone();
        submission.id = id;
        tables.submissions.insert(id, submission);
        Ok(id)
    }

    fn submission(&self, id: i64) -> Result<Option<Submission>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.submissions.get(&id).cloned())
    }

    fn update_submission(&self, submission: &Submission) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.submissions.insert(submission.id, submission.clone());
        Ok(())
    }

    fn delete_submission(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.submissions.remove(&id);

        let publication_ids: Vec<i64> = tables
            .publications
            .values()
            .filter(|p| p.submission_id == id)
            .map(|p| p.id)
            .collect();
        for publication_id in publication_ids {
            tables.publications.remove(&publication_id);
            tables.authors.retain(|_, a| a.publication_id != publication_id);
            tables.galleys.retain(|_, g| g.publication_id != publication_id);
            tables.vocabulary.retain(|(p, _), _| *p != publication_id);
        }
        tables.stage_assignments.retain(|a| a.submission_id != id);
        Ok(())
    }
}

impl PublicationStore for MemoryStore {
    fn insert_publication(&self, publication: &Publication) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("publications");
        let mut publication = publication.clone();
        publication.id = id;
        tables.publications.insert(id, publication);
        Ok(id)
    }

    fn publication(&self, id: i64) -> Result<Option<Publication>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.publications.get(&id).cloned())
    }

    fn update_publication(&self, publication: &Publication) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.publications.insert(publication.id, publication.clone());
        Ok(())
    }
}

impl AuthorStore for MemoryStore {
    fn insert_author(&self, author: &Author) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("authors");
        let mut author = author.clone();
        author.id = id;
        tables.authors.insert(id, author);
        Ok(id)
    }

    fn authors_by_publication(&self, publication_id: i64) -> Result<Vec<Author>> {
        let tables = self.tables.lock().unwrap();
        let mut authors: Vec<Author> = tables
            .authors
            .values()
            .filter(|a| a.publication_id == publication_id)
            .cloned()
            .collect();
        authors.sort_by_key(|a| a.seq);
        Ok(authors)
    }
}

impl GalleyStore for MemoryStore {
    fn insert_galley(&self, galley: &Galley) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("galleys");
        let mut galley = galley.clone();
        galley.id = id;
        tables.galleys.insert(id, galley);
        Ok(id)
    }

    fn update_galley(&self, galley: &Galley) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.galleys.insert(galley.id, galley.clone());
        Ok(())
    }
}

impl VocabularyStore for MemoryStore {
    fn replace_vocabulary(
        &self,
        kind: Vocabulary,
        publication_id: i64,
        terms: &LocalizedValues,
    ) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.vocabulary.insert((publication_id, kind), terms.clone());
        Ok(())
    }

    fn vocabulary(&self, kind: Vocabulary, publication_id: i64) -> Result<LocalizedValues> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .vocabulary
            .get(&(publication_id, kind))
            .cloned()
            .unwrap_or_default())
    }
}

impl UserGroupStore for MemoryStore {
    fn insert_user_group(&self, group: &UserGroup) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("user_groups");
        let mut group = group.clone();
        group.id = id;
        tables.user_groups.insert(id, group);
        Ok(id)
    }

    fn user_group_ids_by_role(&self, role: Role, journal_id: i64) -> Result<Vec<i64>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .user_groups
            .values()
            .filter(|g| g.role == role && g.journal_id == journal_id)
            .map(|g| g.id)
            .collect())
    }

    fn group_assigned_to_stage(&self, group_id: i64, stage: WorkflowStage) -> Result<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .user_groups
            .get(&group_id)
            .is_some_and(|g| g.stages.contains(&stage)))
    }

    fn assign_stage(&self, submission_id: i64, group_id: i64, user_id: i64) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.stage_assignments.push(StageAssignment {
            submission_id,
            group_id,
            user_id,
        });
        Ok(())
    }
}

impl JournalStore for MemoryStore {
    fn insert_journal(&self, journal: &Journal) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("journals");
        let mut journal = journal.clone();
        journal.id = id;
        tables.journals.insert(id, journal);
        Ok(id)
    }

    fn journal_by_path(&self, path: &str) -> Result<Option<Journal>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.journals.values().find(|j| j.path == path).cloned())
    }

    fn journals(&self) -> Result<Vec<Journal>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.journals.values().cloned().collect())
    }
}

impl UserStore for MemoryStore {
    fn insert_user(&self, user: &User) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.assign_id("users");
        let mut user = user.clone();
        user.id = id;
        tables.users.insert(id, user);
        Ok(id)
    }

    fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedString;
    use chrono::NaiveDate;

    fn sample_issue() -> Issue {
        Issue {
            id: 0,
            journal_id: 1,
            volume: 2,
            number: 3,
            year: 2020,
            title: LocalizedString::with("en_US", "Vol. 2, No. 3 (2020)"),
            date_published: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            published: true,
            current: false,
            access_status: Default::default(),
            show_volume: true,
            show_number: true,
            show_year: true,
            show_title: false,
        }
    }

    #[test]
    fn issue_ids_are_assigned_sequentially() {
        let store = MemoryStore::new();
        assert_eq!(store.insert_issue(&sample_issue()).unwrap(), 1);
        assert_eq!(store.insert_issue(&sample_issue()).unwrap(), 2);
    }

    #[test]
    fn published_issue_lookup_respects_published_flag() {
        let store = MemoryStore::new();
        let mut unpublished = sample_issue();
        unpublished.published = false;
        store.insert_issue(&unpublished).unwrap();
        assert!(store.find_published_issue(1, 2, 3).unwrap().is_none());

        store.insert_issue(&sample_issue()).unwrap();
        let found = store.find_published_issue(1, 2, 3).unwrap().unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn delete_submission_cascades() {
        let store = MemoryStore::new();
        let submission_id = store
            .insert_submission(&Submission {
                id: 0,
                journal_id: 1,
                locale: "en_US".into(),
                status: Default::default(),
                stage: Default::default(),
                progress: 0,
                current_publication_id: None,
                date_submitted: None,
                last_modified: None,
            })
            .unwrap();

        let publication_id = store
            .insert_publication(&Publication {
                id: 0,
                submission_id,
                locale: "en_US".into(),
                section_id: 1,
                issue_id: 1,
                version: 1,
                seq: submission_id,
                status: Default::default(),
                date_published: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                access_status: Default::default(),
                title: LocalizedString::with("en_US", "T"),
                abstract_text: LocalizedString::new(),
                pages: None,
                license_url: None,
                copyright_holder: LocalizedString::new(),
                copyright_year: None,
                doi: None,
            })
            .unwrap();

        store
            .insert_author(&Author {
                publication_id,
                ..Default::default()
            })
            .unwrap();
        let mut terms = LocalizedValues::new();
        terms.push("en_US", "topic");
        store
            .replace_vocabulary(Vocabulary::Keyword, publication_id, &terms)
            .unwrap();

        store.delete_submission(submission_id).unwrap();
        assert!(store.publication(publication_id).unwrap().is_none());
        assert!(store.authors_by_publication(publication_id).unwrap().is_empty());
        assert!(store
            .vocabulary(Vocabulary::Keyword, publication_id)
            .unwrap()
            .is_empty());
    }
}
