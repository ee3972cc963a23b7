//! Application state management

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use campus_core::storage::{seed, Collection};
use campus_core::{
    CampusConfig, Collections, DashboardSummary, Database, Error, MockAuthenticator, Poll,
    Result, SystemClock, User, VoteOutcome, VotingEngine,
};
use chrono::Utc;
use directories::ProjectDirs;

/// Main application state
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub config: CampusConfig,
    pub current_user: Arc<Mutex<Option<User>>>,
    data_dir: PathBuf,
}

impl AppState {
    pub fn new(config: CampusConfig) -> Result<Self> {
        Self::open_in(Self::project_dirs()?.data_dir().to_path_buf(), config)
    }

    /// Open state rooted at an explicit data directory
    pub fn open_in(data_dir: PathBuf, config: CampusConfig) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        let db = Database::open(data_dir.join(&config.database_file))?;

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            config,
            current_user: Arc::new(Mutex::new(None)),
            data_dir,
        })
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("edu", "campus", "campus-dashboard").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })
    }

    /// Location of `campus.toml`, if a config directory exists for this platform
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs()
            .ok()
            .map(|dirs| dirs.config_dir().join("campus.toml"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Seed demo records into empty collections when enabled
    pub fn seed_if_enabled(&self) -> Result<Vec<Collection>> {
        if !self.config.seed_demo_data {
            return Ok(Vec::new());
        }
        let db = self.db.lock().unwrap();
        seed::seed_demo_data(&db.records(), Utc::now())
    }

    /// Pick up the user signed in during a previous run.
    ///
    /// A session that cannot be decoded is cleared and treated as signed out.
    pub fn restore_session(&self) -> Result<Option<User>> {
        let db = self.db.lock().unwrap();
        let auth = MockAuthenticator::new(&*db, &self.config.demo_password);
        let user = match auth.restore() {
            Ok(user) => user,
            Err(Error::CorruptState { source, .. }) => {
                tracing::warn!(error = %source, "Discarding unreadable session");
                auth.logout()?;
                None
            }
            Err(e) => return Err(e),
        };
        *self.current_user.lock().unwrap() = user.clone();
        Ok(user)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let db = self.db.lock().unwrap();
        let user =
            MockAuthenticator::new(&*db, &self.config.demo_password).login(email, password)?;
        *self.current_user.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        let db = self.db.lock().unwrap();
        MockAuthenticator::new(&*db, &self.config.demo_password).logout()?;
        *self.current_user.lock().unwrap() = None;
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.lock().unwrap().clone()
    }

    /// Dashboard for the signed-in user
    pub fn dashboard(&self) -> Result<Option<DashboardSummary>> {
        let Some(user) = self.current_user() else {
            return Ok(None);
        };
        let db = self.db.lock().unwrap();
        DashboardSummary::build(&*db, &user, self.config.dashboard_preview).map(Some)
    }

    /// Vote as the signed-in user
    pub fn cast_vote(&self, poll_id: &str, option_id: &str) -> Result<(Poll, VoteOutcome)> {
        let user = self
            .current_user()
            .ok_or_else(|| Error::Authentication("Not signed in".to_string()))?;
        let db = self.db.lock().unwrap();
        let clock = SystemClock;
        VotingEngine::new(&*db, &clock).cast_vote_by_id(poll_id, option_id, &user.id)
    }
}
