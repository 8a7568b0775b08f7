pub(crate) mod http;

#[cfg(test)]
pub(crate) mod fake;

use serde::Deserialize;

use crate::error::StoreError;
use crate::models::{Bill, SelectedFile};

/// Multipart upload of a bill attachment, stamped with the owner's email.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UploadRequest<'a> {
    pub(crate) file: &'a SelectedFile,
    pub(crate) email: &'a str,
}

/// What the store answers to an upload: where the file now lives and the id
/// of the bill record it opened.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadReceipt {
    #[serde(default)]
    pub(crate) file_url: String,
    #[serde(default)]
    pub(crate) key: String,
}

/// The `bills` resource of the remote store.
///
/// Every call settles exactly once: `Ok` when the store resolved, `Err` when
/// it rejected.
pub(crate) trait BillsApi {
    fn list(&self) -> Result<Vec<Bill>, StoreError>;

    fn create(&self, upload: UploadRequest<'_>) -> Result<UploadReceipt, StoreError>;

    /// Replace the bill stored under `selector`.
    fn update(&self, selector: Option<&str>, bill: &Bill) -> Result<Bill, StoreError>;
}

pub(crate) trait Store {
    fn bills(&self) -> Box<dyn BillsApi + '_>;
}

#[cfg(test)]
mod tests;
