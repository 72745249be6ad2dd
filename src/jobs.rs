//! Saved jobs and applications.
//!
//! The board keeps the last fetched lists in memory. Both lists read as
//! empty while the session is not authenticated, whatever was fetched before.

use futures::try_join;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::jobs::{SavedStatus, UpdateApplicationStatus};
use crate::domain::{Application, ApplicationStatus, Job, NewApplication};
use crate::error::ApiResult;
use crate::session::SessionStore;

/// Saved and applied state of a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobStatus {
    pub is_saved: bool,
    pub has_applied: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JobIdQuery<'a> {
    job_id: &'a str,
}

#[derive(Serialize)]
struct StatusQuery {
    status: String,
}

pub struct JobBoard {
    session: Arc<SessionStore>,
    saved_jobs: RwLock<Vec<Job>>,
    applications: RwLock<Vec<Application>>,
}

impl JobBoard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            saved_jobs: RwLock::new(Vec::new()),
            applications: RwLock::new(Vec::new()),
        }
    }

    pub fn saved_jobs(&self) -> Vec<Job> {
        if !self.session.is_authenticated() {
            return Vec::new();
        }
        self.saved_jobs.read().clone()
    }

    pub fn applications(&self) -> Vec<Application> {
        if !self.session.is_authenticated() {
            return Vec::new();
        }
        self.applications.read().clone()
    }

    /// Refetches saved jobs, then applications, when signed in. A failed
    /// fetch is logged and the previous list is kept.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        if !self.session.is_authenticated() {
            return;
        }

        let api = self.session.api();
        match api.get::<Vec<Job>>("/jobs/saved").await {
            Ok(jobs) => *self.saved_jobs.write() = jobs,
            Err(e) => warn!(error = %e, "Error fetching saved jobs"),
        }
        match api.get::<Vec<Application>>("/applications").await {
            Ok(apps) => *self.applications.write() = apps,
            Err(e) => warn!(error = %e, "Error fetching applications"),
        }
    }

    #[instrument(skip(self, job), fields(job_id = %job.id))]
    pub async fn save_job(&self, job: &Job) -> ApiResult<()> {
        self.session
            .api()
            .post_json_unit(&format!("/jobs/{}/save", job.id), job)
            .await?;
        let mut saved = self.saved_jobs.write();
        if !saved.iter().any(|j| j.id == job.id) {
            saved.push(job.clone());
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn unsave_job(&self, job_id: &str) -> ApiResult<()> {
        self.session
            .api()
            .delete(&format!("/jobs/{job_id}/save"))
            .await?;
        self.saved_jobs.write().retain(|j| j.id != job_id);
        Ok(())
    }

    /// Applies to `job` in the `Applied` state, location defaulting to
    /// "Remote".
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    pub async fn apply(&self, job: &Job) -> ApiResult<Application> {
        let application: Application = self
            .session
            .api()
            .post_json("/applications", &NewApplication::for_job(job))
            .await?;
        info!(application_id = %application.id, "Application submitted");
        self.applications.write().push(application.clone());
        Ok(application)
    }

    /// Lists applications, optionally filtered by status.
    pub async fn applications_with_status(
        &self,
        status: Option<ApplicationStatus>,
    ) -> ApiResult<Vec<Application>> {
        let api = self.session.api();
        match status {
            Some(status) => {
                let query = StatusQuery {
                    status: status.filter_key(),
                };
                api.get_with_query("/applications", &query).await
            }
            None => api.get("/applications").await,
        }
    }

    #[instrument(skip(self))]
    pub async fn update_application_status(
        &self,
        application_id: &str,
        status: ApplicationStatus,
    ) -> ApiResult<()> {
        self.session
            .api()
            .put_json_unit(
                &format!("/applications/{application_id}"),
                &UpdateApplicationStatus { status },
            )
            .await?;
        if let Some(app) = self
            .applications
            .write()
            .iter_mut()
            .find(|a| a.id == application_id)
        {
            app.status = status;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_application(&self, application_id: &str) -> ApiResult<()> {
        self.session
            .api()
            .delete(&format!("/applications/{application_id}"))
            .await?;
        self.applications.write().retain(|a| a.id != application_id);
        Ok(())
    }

    pub async fn is_saved(&self, job_id: &str) -> ApiResult<bool> {
        let status: SavedStatus = self
            .session
            .api()
            .get(&format!("/jobs/{job_id}/saved"))
            .await?;
        Ok(status.is_saved)
    }

    /// Whether `job_id` is saved and whether it has been applied to, fetched
    /// together.
    pub async fn job_status(&self, job_id: &str) -> ApiResult<JobStatus> {
        let api = self.session.api();
        let query = JobIdQuery { job_id };
        let (saved, applied) = try_join!(
            self.is_saved(job_id),
            api.get_with_query::<_, Vec<Application>>("/applications", &query),
        )?;
        Ok(JobStatus {
            is_saved: saved,
            has_applied: !applied.is_empty(),
        })
    }
}
