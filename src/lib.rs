//! Normalization of Velero resources (backups, schedules, storage locations,
//! restores) into display-ready records, plus the dashboard summary derived
//! from them.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod items;
pub mod normalize;
pub mod requests;
pub mod setup;

pub use aggregate::{aggregate, summarize};
pub use error::{ExtractError, RequestError};
pub use extract::{BackupPolicy, Candidacy, ResourcePolicy, RestorePolicy, SchedulePolicy, StoragePolicy, extract};
pub use items::*;
pub use normalize::{Dispatch, decode_payload, normalize, parse_backups, parse_restores, parse_schedules, parse_storages};
pub use setup::SetupOnce;
