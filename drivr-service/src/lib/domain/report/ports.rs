use async_trait::async_trait;
use auth::Principal;

use crate::domain::report::errors::ReportError;
use crate::domain::report::models::CreateReportCommand;
use crate::domain::report::models::Report;
use crate::domain::report::models::ReportId;
use crate::domain::report::models::UpdateReportCommand;
use crate::domain::user::models::Pagination;
use crate::domain::user::models::UserId;

/// Port for report domain service operations.
///
/// Every operation takes the acting principal. Owners may do anything with
/// their own reports, moderators may read and delete any report. Reports the
/// actor may not see are reported as `NotFound`.
#[async_trait]
pub trait ReportServicePort: Send + Sync + 'static {
    /// Create a report owned by `actor`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_report(
        &self,
        actor: &Principal<UserId>,
        command: CreateReportCommand,
    ) -> Result<Report, ReportError>;

    /// # Errors
    /// * `NotFound` - Report does not exist or is not visible to `actor`
    /// * `DatabaseError` - Database operation failed
    async fn get_report(
        &self,
        actor: &Principal<UserId>,
        id: &ReportId,
    ) -> Result<Report, ReportError>;

    /// List the reports owned by `actor`, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_reports(
        &self,
        actor: &Principal<UserId>,
        pagination: Pagination,
    ) -> Result<Vec<Report>, ReportError>;

    /// # Errors
    /// * `NotFound` - Report does not exist or is not owned by `actor`
    /// * `DatabaseError` - Database operation failed
    async fn update_report(
        &self,
        actor: &Principal<UserId>,
        id: &ReportId,
        command: UpdateReportCommand,
    ) -> Result<Report, ReportError>;

    /// # Errors
    /// * `NotFound` - Report does not exist or is not visible to `actor`
    /// * `DatabaseError` - Database operation failed
    async fn delete_report(
        &self,
        actor: &Principal<UserId>,
        id: &ReportId,
    ) -> Result<(), ReportError>;
}

/// Persistence operations for report aggregate.
#[async_trait]
pub trait ReportRepository: Send + Sync + 'static {
    async fn create(&self, report: Report) -> Result<Report, ReportError>;

    /// # Returns
    /// Optional report entity (None if not found)
    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, ReportError>;

    /// Reports owned by `owner`, newest first.
    async fn list_by_owner(
        &self,
        owner: &UserId,
        pagination: Pagination,
    ) -> Result<Vec<Report>, ReportError>;

    /// # Errors
    /// * `NotFound` - Report does not exist
    async fn update(&self, report: Report) -> Result<Report, ReportError>;

    /// # Errors
    /// * `NotFound` - Report does not exist
    async fn delete(&self, id: &ReportId) -> Result<(), ReportError>;
}
