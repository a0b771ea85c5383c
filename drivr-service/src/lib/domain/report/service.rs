use std::sync::Arc;

use async_trait::async_trait;
use auth::Principal;
use chrono::Utc;

use super::errors::ReportError;
use super::models::CreateReportCommand;
use super::models::Report;
use super::models::ReportId;
use super::models::UpdateReportCommand;
use super::ports::ReportRepository;
use super::ports::ReportServicePort;
use crate::domain::user::models::Pagination;
use crate::domain::user::models::UserId;

/// What an actor wants to do with an existing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportAction {
    Read,
    Update,
    Delete,
}

impl ReportAction {
    fn permitted(self, actor: &Principal<UserId>, report: &Report) -> bool {
        if report.user_id == actor.id {
            return true;
        }
        match self {
            ReportAction::Read | ReportAction::Delete => actor.is_moderator,
            ReportAction::Update => false,
        }
    }
}

/// Concrete implementation of ReportServicePort.
///
/// Generic over repository for testability.
pub struct ReportService<RR>
where
    RR: ReportRepository,
{
    report_repository: Arc<RR>,
}

impl<RR> ReportService<RR>
where
    RR: ReportRepository,
{
    pub fn new(report_repository: Arc<RR>) -> Self {
        Self { report_repository }
    }

    /// Fetch a report and check `action` against it, hiding what the actor may not touch.
    async fn load_for(
        &self,
        actor: &Principal<UserId>,
        id: &ReportId,
        action: ReportAction,
    ) -> Result<Report, ReportError> {
        let report = self
            .report_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReportError::NotFound(id.to_string()))?;

        if !action.permitted(actor, &report) {
            tracing::debug!(
                report_id = %id,
                actor_id = %actor.id,
                ?action,
                "report access refused"
            );
            return Err(ReportError::NotFound(id.to_string()));
        }

        Ok(report)
    }
}

#[async_trait]
impl<RR> ReportServicePort for ReportService<RR>
where
    RR: ReportRepository,
{
    async fn create_report(
        &self,
        actor: &Principal<UserId>,
        command: CreateReportCommand,
    ) -> Result<Report, ReportError> {
        let now = Utc::now();
        let report = Report {
            id: ReportId::new(),
            user_id: actor.id,
            markdown: command.markdown,
            html: command.html,
            created_at: now,
            updated_at: now,
        };

        self.report_repository.create(report).await
    }

    async fn get_report(
        &self,
        actor: &Principal<UserId>,
        id: &ReportId,
    ) -> Result<Report, ReportError> {
        self.load_for(actor, id, ReportAction::Read).await
    }

    async fn list_reports(
        &self,
        actor: &Principal<UserId>,
        pagination: Pagination,
    ) -> Result<Vec<Report>, ReportError> {
        self.report_repository
            .list_by_owner(&actor.id, pagination)
            .await
    }

    async fn update_report(
        &self,
        actor: &Principal<UserId>,
        id: &ReportId,
        command: UpdateReportCommand,
    ) -> Result<Report, ReportError> {
        let mut report = self.load_for(actor, id, ReportAction::Update).await?;

        if let Some(markdown) = command.markdown {
            report.markdown = markdown;
        }
        if let Some(html) = command.html {
            report.html = html;
        }
        report.updated_at = Utc::now();

        self.report_repository.update(report).await
    }

    async fn delete_report(
        &self,
        actor: &Principal<UserId>,
        id: &ReportId,
    ) -> Result<(), ReportError> {
        self.load_for(actor, id, ReportAction::Delete).await?;
        self.report_repository.delete(id).await
    }
}
