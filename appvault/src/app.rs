//! [`AppVault`]: every repository wired over one key-value store.

use crate::config::AppVaultConfig;
use crate::error::{AppError, AppResult};
use appvault_activity::{
    calendar_grid, ActivityAggregator, ActivityReport, DashboardStats, DayActivity, MonthSummary,
    ProfileStats, StreakTracker, TaskStats,
};
use appvault_blobstore::{
    download, prepare_avatar, prepare_pdf_upload, ClipboardWriter, DownloadedFile, FileSource,
};
use appvault_crypto::generate_password;
use appvault_storage::{
    FileStore, KeyValueStore, LinkRepository, MemoryStore, PdfRepository, ProfileRepository,
    RecordQuery, StorageError, TaskFilter, TaskRepository,
};
use appvault_types::{
    calendar_day, Clock, CreatePdfRequest, CreateTaskRequest, Pdf, Profile, RecordKind,
    SystemClock, Task, TaskCategory, UpdateProfileRequest, UpdateTaskRequest,
};
use appvault_vault::PasswordVault;
use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// One month of the activity calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Every day of the month with its tally.
    pub days: Vec<DayActivity>,
    pub summary: MonthSummary,
    /// Sunday-first cells covering the month, including neighbouring days.
    pub grid: Vec<NaiveDate>,
}

pub struct AppVault {
    config: AppVaultConfig,
    offset: FixedOffset,
    clock: Arc<dyn Clock>,
    links: LinkRepository,
    pdfs: PdfRepository,
    passwords: PasswordVault,
    tasks: TaskRepository,
    profile: ProfileRepository,
    streak: StreakTracker,
}

impl AppVault {
    /// Opens the file-backed store in `config.data_dir`.
    pub fn open(config: AppVaultConfig) -> AppResult<Self> {
        let dir = config
            .data_dir
            .clone()
            .ok_or_else(|| AppError::Config("data_dir is not set".into()))?;
        let store = FileStore::open(&dir)?;
        info!(dir = %dir.display(), "App Vault opened");
        Self::with_store(Arc::new(store), Arc::new(SystemClock), config)
    }

    /// A vault over a fresh in-memory store.
    pub fn in_memory(config: AppVaultConfig) -> AppResult<Self> {
        Self::with_store(Arc::new(MemoryStore::new()), Arc::new(SystemClock), config)
    }

    pub fn with_store(
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: AppVaultConfig,
    ) -> AppResult<Self> {
        config.validate()?;
        let offset = config.offset()?;
        let streak = StreakTracker::new(kv.clone(), offset, config.streak_policy);
        Ok(Self {
            links: LinkRepository::new(kv.clone(), clock.clone()),
            pdfs: PdfRepository::new(kv.clone(), clock.clone()),
            passwords: PasswordVault::open(kv.clone(), clock.clone()),
            tasks: TaskRepository::new(kv.clone(), clock.clone())
                .observe(Arc::new(streak.clone())),
            profile: ProfileRepository::new(kv),
            streak,
            config,
            offset,
            clock,
        })
    }

    pub fn config(&self) -> &AppVaultConfig {
        &self.config
    }

    /// The current calendar day in the configured offset.
    pub fn today(&self) -> NaiveDate {
        calendar_day(self.clock.now(), self.offset)
    }

    pub fn links(&self) -> &LinkRepository {
        &self.links
    }

    pub fn pdfs(&self) -> &PdfRepository {
        &self.pdfs
    }

    pub fn passwords(&self) -> &PasswordVault {
        &self.passwords
    }

    /// The task repository. Every change made through it also runs the
    /// streak update.
    pub fn tasks(&self) -> &TaskRepository {
        &self.tasks
    }

    // ------------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------------

    pub fn create_task(&self, request: CreateTaskRequest) -> AppResult<Task> {
        Ok(self.tasks.create(request)?)
    }

    pub fn update_task(&self, id: &str, request: UpdateTaskRequest) -> AppResult<Task> {
        Ok(self.tasks.update(id, request)?)
    }

    pub fn delete_task(&self, id: &str) -> AppResult<Task> {
        Ok(self.tasks.delete(id)?)
    }

    pub fn toggle_task(&self, id: &str) -> AppResult<Task> {
        Ok(self.tasks.toggle_completed(id)?)
    }

    /// Tasks matching `query` and `filter` as of today.
    pub fn search_tasks(
        &self,
        query: &RecordQuery<TaskCategory>,
        filter: TaskFilter,
    ) -> Vec<Task> {
        self.tasks.search(query, filter, self.today())
    }

    pub fn task_stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks.list(), self.today())
    }

    pub fn streak(&self) -> u32 {
        self.streak.current()
    }

    // ------------------------------------------------------------------------
    // Activity
    // ------------------------------------------------------------------------

    pub fn activity(&self) -> ActivityReport {
        ActivityAggregator::new(self.today(), self.offset).aggregate(
            &self.links.list(),
            &self.pdfs.list(),
            &self.passwords.stored_entries(),
            &self.tasks.list(),
        )
    }

    pub fn calendar(&self, year: i32, month: u32) -> AppResult<CalendarMonth> {
        let report = self.activity();
        let days = report.month_view(year, month)?;
        Ok(CalendarMonth {
            year,
            month,
            summary: MonthSummary::from_days(&days),
            grid: calendar_grid(year, month)?,
            days,
        })
    }

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::new(
            self.links.list().len(),
            self.pdfs.list().len(),
            self.passwords.count(),
            &self.tasks.list(),
            self.streak.current(),
        )
    }

    pub fn profile_stats(&self) -> ProfileStats {
        ProfileStats {
            links: self.links.list().len(),
            pdfs: self.pdfs.list().len(),
            passwords: self.passwords.count(),
            tasks: self.tasks.list().len(),
        }
    }

    // ------------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------------

    /// Reads the picked PDF and stores it with the request's metadata.
    pub fn upload_pdf(&self, source: &dyn FileSource, request: CreatePdfRequest) -> AppResult<Pdf> {
        let file = prepare_pdf_upload(source)?;
        Ok(self.pdfs.create(CreatePdfRequest {
            file: Some(file),
            ..request
        })?)
    }

    pub fn download_pdf(&self, id: &str) -> AppResult<DownloadedFile> {
        let pdf = self.pdfs.get(id).ok_or_else(|| StorageError::NotFound {
            kind: RecordKind::Pdf,
            id: id.to_string(),
        })?;
        Ok(download(&pdf.file_name, &pdf.file_data)?)
    }

    pub fn profile(&self) -> Profile {
        self.profile.load()
    }

    pub fn save_profile(&self, profile: Profile) -> AppResult<Profile> {
        Ok(self.profile.save(UpdateProfileRequest { profile })?)
    }

    /// Replaces the profile avatar with the picked image.
    pub fn set_avatar(&self, source: &dyn FileSource) -> AppResult<Profile> {
        let avatar = prepare_avatar(source)?;
        let profile = Profile {
            avatar,
            ..self.profile.load()
        };
        self.save_profile(profile)
    }

    // ------------------------------------------------------------------------
    // Passwords
    // ------------------------------------------------------------------------

    /// A random password of the configured length.
    pub fn generate_password(&self) -> String {
        generate_password(self.config.password_length)
    }

    /// Writes the decoded secret of entry `id` to the clipboard.
    pub fn copy_password(&self, id: &str, clipboard: &dyn ClipboardWriter) -> AppResult<()> {
        let entry = self.passwords.get(id)?;
        clipboard.write_text(&entry.secret)?;
        info!(entry_id = %id, "Password copied");
        Ok(())
    }
}
