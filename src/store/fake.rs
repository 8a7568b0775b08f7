use std::cell::RefCell;

use super::{BillsApi, Store, UploadReceipt, UploadRequest};
use crate::error::StoreError;
use crate::models::Bill;

/// In-memory store that records every call it receives.
#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) bills: Vec<Bill>,
    pub(crate) receipt: Option<UploadReceipt>,
    pub(crate) fail_list: Option<u16>,
    pub(crate) fail_create: Option<u16>,
    pub(crate) fail_update: Option<u16>,
    pub(crate) calls: RefCell<Calls>,
}

#[derive(Default, Debug)]
pub(crate) struct Calls {
    pub(crate) list: usize,
    /// (file name, email)
    pub(crate) create: Vec<(String, String)>,
    pub(crate) update: Vec<(Option<String>, Bill)>,
}

impl FakeStore {
    pub(crate) fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills,
            ..Self::default()
        }
    }

    pub(crate) fn total_calls(&self) -> usize {
        let calls = self.calls.borrow();
        calls.list + calls.create.len() + calls.update.len()
    }
}

fn rejected(status: u16) -> StoreError {
    StoreError::Api {
        status,
        message: "simulated failure".into(),
    }
}

impl Store for FakeStore {
    fn bills(&self) -> Box<dyn BillsApi + '_> {
        Box::new(FakeBills { store: self })
    }
}

struct FakeBills<'a> {
    store: &'a FakeStore,
}

impl BillsApi for FakeBills<'_> {
    fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.store.calls.borrow_mut().list += 1;
        match self.store.fail_list {
            Some(status) => Err(rejected(status)),
            None => Ok(self.store.bills.clone()),
        }
    }

    fn create(&self, upload: UploadRequest<'_>) -> Result<UploadReceipt, StoreError> {
        self.store
            .calls
            .borrow_mut()
            .create
            .push((upload.file.name.clone(), upload.email.to_string()));
        if let Some(status) = self.store.fail_create {
            return Err(rejected(status));
        }
        Ok(self.store.receipt.clone().unwrap_or(UploadReceipt {
            file_url: format!("https://localhost:3456/images/{}", upload.file.name),
            key: "1234".into(),
        }))
    }

    fn update(&self, selector: Option<&str>, bill: &Bill) -> Result<Bill, StoreError> {
        self.store
            .calls
            .borrow_mut()
            .update
            .push((selector.map(str::to_string), bill.clone()));
        match self.store.fail_update {
            Some(status) => Err(rejected(status)),
            None => Ok(bill.clone()),
        }
    }
}
