use appvault::activity::{ActivityLevel, StreakPolicy};
use appvault::blobstore::{BlobError, BlobResult, ClipboardWriter, PickedFile};
use appvault::storage::{keys, KeyValueStore, MemoryStore, RecordQuery, StorageError, TaskFilter};
use appvault::types::{
    CreateLinkRequest, CreatePasswordRequest, CreatePdfRequest, CreateTaskRequest, FixedClock,
    PdfCategory, Profile, TaskCategory, UpdateTaskRequest,
};
use appvault::vault::VaultError;
use appvault::{AppError, AppVault, AppVaultConfig};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn start() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
    ))
}

fn app_with(policy: StreakPolicy) -> (AppVault, Arc<FixedClock>, Arc<MemoryStore>) {
    let clock = start();
    let kv = Arc::new(MemoryStore::new());
    let config = AppVaultConfig {
        streak_policy: policy,
        ..Default::default()
    };
    let app = AppVault::with_store(kv.clone(), clock.clone(), config).unwrap();
    (app, clock, kv)
}

fn task(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.into(),
        ..Default::default()
    }
}

#[derive(Default)]
struct RecordingClipboard(Mutex<Vec<String>>);

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&self, text: &str) -> BlobResult<()> {
        self.0
            .lock()
            .map_err(|e| BlobError::Clipboard(e.to_string()))?
            .push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// Streak through task mutations
// ============================================================================

fn complete_one_per_day(policy: StreakPolicy) -> Vec<u32> {
    let (app, clock, _) = app_with(policy);
    let mut seen = Vec::new();
    for gap in [0, 1, 2] {
        clock.advance(Duration::days(gap));
        let t = app.create_task(task("daily")).unwrap();
        app.toggle_task(&t.id).unwrap();
        seen.push(app.streak());
    }
    seen
}

#[test]
fn streak_follows_daily_completions() {
    assert_eq!(complete_one_per_day(StreakPolicy::Preserve), vec![1, 2, 2]);
    assert_eq!(complete_one_per_day(StreakPolicy::ResetOnGap), vec![1, 2, 1]);
}

#[test]
fn removing_todays_completion_keeps_streak() {
    let (app, _, kv) = app_with(StreakPolicy::Preserve);
    let t = app.create_task(task("only")).unwrap();
    app.toggle_task(&t.id).unwrap();
    assert_eq!(app.streak(), 1);

    app.delete_task(&t.id).unwrap();
    app.create_task(task("later")).unwrap();
    assert_eq!(app.streak(), 1);
    assert_eq!(kv.get(keys::STREAK).unwrap().as_deref(), Some("1"));
}

#[test]
fn task_edit_keeps_completion_and_stats() {
    let (app, clock, _) = app_with(StreakPolicy::Preserve);
    let today = app.today();
    let done = app.create_task(task("done")).unwrap();
    app.toggle_task(&done.id).unwrap();
    app.create_task(CreateTaskRequest {
        due_date: Some(today),
        ..task("due today")
    })
    .unwrap();
    app.create_task(CreateTaskRequest {
        due_date: today.pred_opt(),
        ..task("late")
    })
    .unwrap();

    clock.advance(Duration::hours(1));
    let edited = app
        .update_task(
            &done.id,
            UpdateTaskRequest {
                title: Some("renamed".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(edited.is_completed());

    let stats = app.task_stats();
    assert_eq!((stats.total, stats.completed, stats.pending), (3, 1, 2));
    assert_eq!((stats.overdue, stats.today), (1, 1));
    let all = RecordQuery::default();
    assert_eq!(app.search_tasks(&all, TaskFilter::Overdue)[0].title, "late");
    assert_eq!(app.dashboard().active_tasks, 2);
}

#[test]
fn repository_changes_also_credit_streak() {
    let (app, clock, kv) = app_with(StreakPolicy::Preserve);
    let t = app.tasks().create(task("direct")).unwrap();
    assert_eq!(app.streak(), 0);
    app.tasks().toggle_completed(&t.id).unwrap();
    assert_eq!(app.streak(), 1);
    assert_eq!(kv.get(keys::STREAK_DAY).unwrap().as_deref(), Some("2024-05-01"));

    clock.advance(Duration::days(1));
    let next = app.tasks().create(task("next")).unwrap();
    app.tasks()
        .update(
            &next.id,
            UpdateTaskRequest {
                title: Some("next day".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(app.streak(), 1);
    app.toggle_task(&next.id).unwrap();
    assert_eq!(app.streak(), 2);

    app.tasks().delete(&next.id).unwrap();
    assert_eq!(app.streak(), 2);
    assert_eq!(kv.get(keys::STREAK).unwrap().as_deref(), Some("2"));
}

#[test]
fn task_search_by_category() {
    let (app, _, _) = app_with(StreakPolicy::Preserve);
    app.create_task(CreateTaskRequest {
        category: TaskCategory::Health,
        ..task("run")
    })
    .unwrap();
    app.create_task(task("read")).unwrap();

    let health = RecordQuery::default().in_category(TaskCategory::Health);
    let hits = app.search_tasks(&health, TaskFilter::Pending);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "run");
    let read_in_health = RecordQuery::text("read").in_category(TaskCategory::Health);
    assert!(app.search_tasks(&read_in_health, TaskFilter::All).is_empty());
}

// ============================================================================
// Calendar
// ============================================================================

#[test]
fn calendar_counts_everything_created() {
    let (app, clock, _) = app_with(StreakPolicy::Preserve);
    app.links()
        .create(CreateLinkRequest {
            title: "Example".into(),
            url: "example.com".into(),
            ..Default::default()
        })
        .unwrap();
    app.passwords()
        .create(CreatePasswordRequest {
            title: "Mail".into(),
            secret: "pw".into(),
            ..Default::default()
        })
        .unwrap();
    clock.advance(Duration::days(2));
    let t = app.create_task(task("t")).unwrap();
    app.toggle_task(&t.id).unwrap();

    let month = app.calendar(2024, 5).unwrap();
    assert_eq!(month.days.len(), 31);
    assert_eq!(month.days[0].total, 2);
    assert_eq!(month.days[0].level, ActivityLevel::Low);
    assert_eq!(month.days[2].tally.completed, 1);
    assert_eq!(month.summary.total_activity, 3);
    assert_eq!(month.grid.first(), NaiveDate::from_ymd_opt(2024, 4, 28).as_ref());
    assert!(app.calendar(2024, 0).is_err());
}

#[test]
fn locked_vault_still_counts_in_views() {
    let clock = start();
    let kv = Arc::new(MemoryStore::new());
    AppVault::with_store(kv.clone(), clock.clone(), AppVaultConfig::default())
        .unwrap()
        .passwords()
        .create(CreatePasswordRequest {
            title: "Bank".into(),
            secret: "pw".into(),
            ..Default::default()
        })
        .unwrap();

    let app = AppVault::with_store(kv, clock, AppVaultConfig::default()).unwrap();
    assert!(!app.passwords().is_unlocked());
    assert_eq!(app.dashboard().passwords, 1);
    assert_eq!(app.profile_stats().passwords, 1);
    assert_eq!(app.activity().day(app.today()).passwords, 1);
}

// ============================================================================
// Files, profile and passwords
// ============================================================================

#[test]
fn pdf_upload_and_download() {
    let (app, _, kv) = app_with(StreakPolicy::Preserve);
    let picked = PickedFile {
        name: "Quarterly Report.pdf".into(),
        mime_type: "application/pdf".into(),
        bytes: b"%PDF-1.7 body".to_vec(),
    };
    let pdf = app
        .upload_pdf(
            &picked,
            CreatePdfRequest {
                category: PdfCategory::Work,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(pdf.title, "Quarterly Report");
    assert_eq!(pdf.file_size, "13 Bytes");

    let file = app.download_pdf(&pdf.id).unwrap();
    assert_eq!(file.file_name, "Quarterly Report.pdf");
    assert_eq!(file.bytes, picked.bytes);

    let png = PickedFile {
        mime_type: "image/png".into(),
        ..picked
    };
    assert!(matches!(
        app.upload_pdf(&png, CreatePdfRequest::default()),
        Err(AppError::Blob(BlobError::UnsupportedType { .. }))
    ));
    assert_eq!(app.pdfs().list().len(), 1);
    assert!(kv.get(keys::PDFS).unwrap().is_some());

    assert!(matches!(
        app.download_pdf("missing"),
        Err(AppError::Storage(StorageError::NotFound { .. }))
    ));
}

#[test]
fn avatar_and_profile() {
    let (app, _, _) = app_with(StreakPolicy::Preserve);
    app.save_profile(Profile {
        name: "ada lovelace".into(),
        ..Default::default()
    })
    .unwrap();
    let profile = app
        .set_avatar(&PickedFile {
            name: "me.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        })
        .unwrap();
    assert_eq!(profile.name, "ada lovelace");
    assert_eq!(profile.avatar, "data:image/png;base64,AQID");
    assert_eq!(app.profile().initials(), "AL");
}

#[test]
fn copy_password_requires_unlock() {
    let clock = start();
    let kv = Arc::new(MemoryStore::new());
    let id = AppVault::with_store(kv.clone(), clock.clone(), AppVaultConfig::default())
        .unwrap()
        .passwords()
        .create(CreatePasswordRequest {
            title: "Mail".into(),
            secret: "hunter2".into(),
            ..Default::default()
        })
        .unwrap()
        .id;

    let app = AppVault::with_store(kv, clock, AppVaultConfig::default()).unwrap();
    let clipboard = RecordingClipboard::default();
    assert!(matches!(
        app.copy_password(&id, &clipboard),
        Err(AppError::Vault(VaultError::Locked))
    ));

    app.passwords().unlock("vault123").unwrap();
    app.copy_password(&id, &clipboard).unwrap();
    assert_eq!(*clipboard.0.lock().unwrap(), vec!["hunter2".to_string()]);
}

#[test]
fn generated_password_uses_configured_length() {
    let config = AppVaultConfig {
        password_length: 24,
        ..Default::default()
    };
    let app = AppVault::in_memory(config).unwrap();
    assert_eq!(app.generate_password().chars().count(), 24);
}

// ============================================================================
// File-backed store
// ============================================================================

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppVaultConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    let app = AppVault::open(config.clone()).unwrap();
    app.links()
        .create(CreateLinkRequest {
            title: "Example".into(),
            url: "example.com".into(),
            ..Default::default()
        })
        .unwrap();
    drop(app);

    let links = AppVault::open(config).unwrap().links().list();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://example.com");
}

#[test]
fn open_requires_data_dir() {
    assert!(matches!(
        AppVault::open(AppVaultConfig::default()),
        Err(AppError::Config(_))
    ));
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app-vault.toml");
    std::fs::write(
        &path,
        format!(
            "data_dir = {:?}\nutc_offset_minutes = 60\nstreak_policy = \"reset-on-gap\"\n",
            dir.path().join("data")
        ),
    )
    .unwrap();

    let config = AppVaultConfig::load(&path).unwrap();
    assert_eq!(config.utc_offset_minutes, 60);
    assert_eq!(config.streak_policy, StreakPolicy::ResetOnGap);
    let app = AppVault::open(config).unwrap();
    assert_eq!(app.streak(), 0);
}
