//! Relink engine: remote ingestion, redirect publishing and report output.
mod config;
mod destination;
mod engine;
mod paginate;
mod publish;
mod report;
mod source;
mod transport;
mod types;

pub use config::{Credentials, ReconcileConfig, DEFAULT_AUDIT_OUTPUT};
pub use destination::{DestinationClient, DESTINATION_API_BASE, PLACEHOLDER_PASSWORD};
pub use engine::{Reconciler, RunReport};
pub use paginate::{collect_pages, parse_page, Page};
pub use publish::RedirectPublisher;
pub use report::{write_orphans_csv, ReportError};
pub use source::{SourceClient, SOURCE_API_BASE};
pub use transport::{Auth, ReqwestTransport, Transport, TransportSettings};
pub use types::{FailureKind, PublishError, ReconcileError, ResponseShapeError, TransportError};
