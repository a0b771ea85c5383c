pub mod report;
pub mod user;

pub use report::PostgresReportRepository;
pub use user::PostgresUserRepository;
