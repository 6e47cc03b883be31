use mentorhub_store::StoreError;

use crate::catalog::CatalogName;
use crate::wizard::WizardStep;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("{value:?} is not an option of {catalog}")]
    UnknownOption { catalog: CatalogName, value: String },
    #[error("max mentees must be a whole number between 1 and 10, got {0:?}")]
    InvalidMaxMentees(String),
    #[error("unknown role {0:?}")]
    UnknownRole(String),
    #[error("unknown route {0:?}")]
    UnknownRoute(String),
    #[error("choose a role before continuing")]
    RoleRequired,
    #[error("this is the last step, finish instead")]
    NextUnavailable,
    #[error("finish is only available on the last step")]
    NotAtFinalStep,
    #[error("{0:?} is not part of this wizard")]
    StepNotInLayout(WizardStep),
}

/// Why a feed page could not be fetched. The feed logs these and lets the
/// next viewport trigger retry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("mentor source unavailable: {0}")]
    Unavailable(String),
    #[error("page {0} could not be decoded")]
    Malformed(u32),
}
