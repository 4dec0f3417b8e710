use appvault_storage::{
    keys, EntityStore, FileStore, KeyValueStore, LinkRepository, MemoryStore, PdfRepository,
    ProfileRepository, RecordQuery, StorageError, TaskFilter, TaskObserver, TaskRepository,
};
use appvault_types::{
    CreateLinkRequest, CreatePdfRequest, CreateTaskRequest, FixedClock, Link, LinkCategory,
    PdfCategory, Profile, Task, TaskCategory, UpdateLinkRequest, UpdatePdfRequest,
    UpdateProfileRequest, UpdateTaskRequest, UploadedFile, ValidationError,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap(),
    ))
}

fn docs_request() -> CreateLinkRequest {
    CreateLinkRequest {
        title: "Docs".into(),
        url: "example.com".into(),
        ..Default::default()
    }
}

// ── Links ────────────────────────────────────────────────────────

#[test]
fn link_url_normalized_and_reloaded() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let links = LinkRepository::new(kv.clone(), clock());

    links.create(docs_request()).unwrap();

    // Fresh repository over the same store, as after a reload.
    let reloaded = LinkRepository::new(kv, clock()).list();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].title, "Docs");
    assert_eq!(reloaded[0].url, "https://example.com");
}

#[test]
fn create_assigns_id_and_timestamp() {
    let clock = clock();
    let links = LinkRepository::new(Arc::new(MemoryStore::new()), clock.clone());
    let a = links.create(docs_request()).unwrap();
    let b = links.create(docs_request()).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.created_at, Some(Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap()));
}

#[test]
fn edit_preserves_id_and_created_at() {
    let clock = clock();
    let links = LinkRepository::new(Arc::new(MemoryStore::new()), clock.clone());
    let original = links.create(docs_request()).unwrap();

    clock.advance(Duration::days(3));
    let edited = links
        .update(
            &original.id,
            UpdateLinkRequest {
                title: Some("API Docs".into()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(edited.id, original.id);
    assert_eq!(edited.created_at, original.created_at);
    assert_eq!(edited.title, "API Docs");
    assert_eq!(edited.url, original.url);
    assert_eq!(links.list(), vec![edited]);
}

#[test]
fn invalid_request_writes_nothing() {
    let kv = Arc::new(MemoryStore::new());
    let links = LinkRepository::new(kv.clone(), clock());
    let err = links
        .create(CreateLinkRequest {
            title: String::new(),
            url: "example.com".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(ValidationError::EmptyField("title"))));
    assert_eq!(kv.get(keys::LINKS).unwrap(), None);
}

#[test]
fn search_links_by_tag_and_category() {
    let links = LinkRepository::new(Arc::new(MemoryStore::new()), clock());
    links
        .create(CreateLinkRequest {
            title: "Crates".into(),
            url: "crates.io".into(),
            tags: vec!["rust".into()],
            category: LinkCategory::Tools,
            ..Default::default()
        })
        .unwrap();
    links.create(docs_request()).unwrap();

    assert_eq!(links.search(&RecordQuery::text("RUST")).len(), 1);
    assert_eq!(
        links
            .search(&RecordQuery::default().in_category(LinkCategory::Tools))
            .len(),
        1
    );
    assert_eq!(links.search(&RecordQuery::default()).len(), 2);
}

// ── Malformed data and write failures ────────────────────────────

#[test]
fn malformed_collection_loads_empty() {
    let kv = Arc::new(MemoryStore::new());
    kv.set(keys::LINKS, "{not json").unwrap();
    let links = LinkRepository::new(kv, clock());
    assert!(links.list().is_empty());
    // A later save starts over from the empty collection.
    links.create(docs_request()).unwrap();
    assert_eq!(links.list().len(), 1);
}

#[test]
fn quota_exceeded_leaves_previous_value() {
    let kv = Arc::new(MemoryStore::with_quota(600));
    let links = LinkRepository::new(kv.clone(), clock());
    links.create(docs_request()).unwrap();
    let before = kv.get(keys::LINKS).unwrap();

    let err = links
        .create(CreateLinkRequest {
            description: "x".repeat(1000),
            ..docs_request()
        })
        .unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { .. }));
    assert_eq!(kv.get(keys::LINKS).unwrap(), before);
    assert_eq!(links.list().len(), 1);
}

#[test]
fn browser_written_links_load() {
    let kv = Arc::new(MemoryStore::new());
    kv.set(
        keys::LINKS,
        r#"[{"id":"1717000000000","title":"Docs","url":"https://example.com","description":"","tags":["a","b"],"category":"learning","createdAt":"2024-05-29T10:00:00.000Z"}]"#,
    )
    .unwrap();
    let links = LinkRepository::new(kv, clock()).list();
    assert_eq!(links[0].id, "1717000000000");
    assert_eq!(links[0].category, LinkCategory::Learning);
    assert_eq!(links[0].tags, vec!["a", "b"]);
}

// ── PDFs ─────────────────────────────────────────────────────────

#[test]
fn pdf_update_keeps_file() {
    let pdfs = PdfRepository::new(Arc::new(MemoryStore::new()), clock());
    let pdf = pdfs
        .create(CreatePdfRequest {
            title: String::new(),
            file: Some(UploadedFile {
                name: "invoice.pdf".into(),
                size: "3 Bytes".into(),
                data_url: "data:application/pdf;base64,JVBE".into(),
            }),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(pdf.title, "invoice");

    let updated = pdfs
        .update(
            &pdf.id,
            UpdatePdfRequest {
                category: Some(PdfCategory::Invoices),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.file_data, pdf.file_data);
    assert_eq!(updated.file_name, "invoice.pdf");
    assert_eq!(updated.category, PdfCategory::Invoices);
}

#[test]
fn pdf_without_file_rejected() {
    let pdfs = PdfRepository::new(Arc::new(MemoryStore::new()), clock());
    let err = pdfs
        .create(CreatePdfRequest {
            title: "Notes".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(ValidationError::MissingFile)));
}

// ── Tasks ────────────────────────────────────────────────────────

#[test]
fn toggle_sets_and_clears_completed_at() {
    let clock = clock();
    let tasks = TaskRepository::new(Arc::new(MemoryStore::new()), clock.clone());
    let task = tasks
        .create(CreateTaskRequest {
            title: "Ship".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(!task.is_completed());

    clock.advance(Duration::hours(2));
    let done = tasks.toggle_completed(&task.id).unwrap();
    assert_eq!(done.completed_at, Some(clock_now(&clock)));

    let reopened = tasks.toggle_completed(&task.id).unwrap();
    assert_eq!(reopened.completed_at, None);
}

fn clock_now(clock: &FixedClock) -> chrono::DateTime<Utc> {
    use appvault_types::Clock;
    clock.now()
}

#[test]
fn update_task_does_not_touch_completion() {
    let tasks = TaskRepository::new(Arc::new(MemoryStore::new()), clock());
    let task = tasks
        .create(CreateTaskRequest {
            title: "Ship".into(),
            ..Default::default()
        })
        .unwrap();
    let done = tasks.toggle_completed(&task.id).unwrap();
    let edited = tasks
        .update(
            &task.id,
            UpdateTaskRequest {
                title: Some("Ship it".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(edited.completed_at, done.completed_at);
}

#[test]
fn task_search_with_filter() {
    let tasks = TaskRepository::new(Arc::new(MemoryStore::new()), clock());
    let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    for (title, due, category) in [
        ("Pay rent", 1, TaskCategory::Personal),
        ("Call mom", 3, TaskCategory::Personal),
        ("Plan trip", 20, TaskCategory::General),
    ] {
        tasks
            .create(CreateTaskRequest {
                title: title.into(),
                due_date: NaiveDate::from_ymd_opt(2024, 6, due),
                category,
                ..Default::default()
            })
            .unwrap();
    }
    let all = RecordQuery::default();
    assert_eq!(tasks.search(&all, TaskFilter::Overdue, today)[0].title, "Pay rent");
    assert_eq!(tasks.search(&all, TaskFilter::Today, today)[0].title, "Call mom");
    assert_eq!(tasks.search(&RecordQuery::text("p"), TaskFilter::Pending, today).len(), 2);
    assert!(tasks.search(&all, TaskFilter::Completed, today).is_empty());

    let personal = RecordQuery::text("p").in_category(TaskCategory::Personal);
    let hits = tasks.search(&personal, TaskFilter::All, today);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Pay rent");
    let work = RecordQuery::default().in_category(TaskCategory::Work);
    assert!(tasks.search(&work, TaskFilter::All, today).is_empty());
}

#[derive(Default)]
struct RecordingObserver(Mutex<Vec<usize>>);

impl TaskObserver for RecordingObserver {
    fn tasks_changed(&self, tasks: &[Task], _now: chrono::DateTime<Utc>) {
        self.0.lock().unwrap().push(tasks.len());
    }
}

#[test]
fn observers_see_every_task_change() {
    let observer = Arc::new(RecordingObserver::default());
    let tasks = TaskRepository::new(Arc::new(MemoryStore::new()), clock())
        .observe(observer.clone());
    let task = tasks
        .create(CreateTaskRequest {
            title: "Ship".into(),
            ..Default::default()
        })
        .unwrap();
    tasks.toggle_completed(&task.id).unwrap();
    tasks
        .update(
            &task.id,
            UpdateTaskRequest {
                title: Some("Ship it".into()),
                ..Default::default()
            },
        )
        .unwrap();
    tasks.delete(&task.id).unwrap();
    assert_eq!(*observer.0.lock().unwrap(), vec![1, 1, 1, 0]);

    assert!(tasks.delete(&task.id).is_err());
    assert_eq!(observer.0.lock().unwrap().len(), 4);
}

// ── Profile ──────────────────────────────────────────────────────

#[test]
fn profile_defaults_then_saves() {
    let kv = Arc::new(MemoryStore::new());
    let profiles = ProfileRepository::new(kv.clone());
    assert_eq!(profiles.load(), Profile::default());

    let mut profile = Profile::default();
    profile.name = "Grace Hopper".into();
    profile.social_links.github = "https://github.com/grace".into();
    profiles
        .save(UpdateProfileRequest {
            profile: profile.clone(),
        })
        .unwrap();
    assert_eq!(ProfileRepository::new(kv).load(), profile);
}

#[test]
fn malformed_profile_loads_default() {
    let kv = Arc::new(MemoryStore::new());
    kv.set(keys::PROFILE, "[]").unwrap();
    assert_eq!(ProfileRepository::new(kv).load(), Profile::default());
}

// ── File-backed store ────────────────────────────────────────────

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    {
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        LinkRepository::new(kv, clock()).create(docs_request()).unwrap();
    }
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    let links = LinkRepository::new(kv.clone(), clock()).list();
    assert_eq!(links.len(), 1);
    assert!(dir.path().join("app-vault-links.json").exists());

    kv.remove(keys::LINKS).unwrap();
    assert!(LinkRepository::new(kv, clock()).list().is_empty());
}

#[test]
fn file_store_missing_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let kv = FileStore::open(&dir.path().join("nested")).unwrap();
    assert_eq!(kv.get("nothing").unwrap(), None);
    kv.remove("nothing").unwrap();
}

// ── Property: net effect of add/edit/delete ──────────────────────

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Edit(usize, String),
        Delete(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(Op::Add),
            (any::<usize>(), "[a-z]{1,8}").prop_map(|(i, t)| Op::Edit(i, t)),
            any::<usize>().prop_map(Op::Delete),
        ]
    }

    fn link(id: usize, title: &str) -> Link {
        Link {
            id: format!("id-{id}"),
            title: title.to_string(),
            url: "https://example.com".into(),
            description: String::new(),
            tags: Vec::new(),
            category: LinkCategory::General,
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(id as i64)),
        }
    }

    proptest! {
        #[test]
        fn store_reflects_net_effect(ops in proptest::collection::vec(op(), 0..40)) {
            let store: EntityStore<Link> = EntityStore::new(Arc::new(MemoryStore::new()));
            let mut model: Vec<Link> = Vec::new();
            let mut next_id = 0usize;

            for op in ops {
                match op {
                    Op::Add(title) => {
                        let record = link(next_id, &title);
                        next_id += 1;
                        store.add(record.clone()).unwrap();
                        model.push(record);
                    }
                    Op::Edit(i, title) if !model.is_empty() => {
                        let index = i % model.len();
                        let id = model[index].id.clone();
                        store.update(&id, |l| l.title = title.clone()).unwrap();
                        model[index].title = title;
                    }
                    Op::Delete(i) if !model.is_empty() => {
                        let index = i % model.len();
                        let id = model.remove(index).id;
                        store.delete(&id).unwrap();
                    }
                    _ => {}
                }
            }

            let stored = store.load_all();
            let ids: HashSet<&str> = stored.iter().map(|l| l.id.as_str()).collect();
            prop_assert_eq!(ids.len(), stored.len());
            prop_assert_eq!(stored, model);
        }
    }
}
