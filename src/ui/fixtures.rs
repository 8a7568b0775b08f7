use crate::models::{Bill, BillStatus, ExpenseType};

pub(crate) const EMPLOYEE_EMAIL: &str = "employee@test.tld";

pub(crate) fn bill(id: &str, name: &str, date: &str, status: BillStatus) -> Bill {
    Bill {
        id: Some(id.to_string()),
        email: "a@a".to_string(),
        expense_type: ExpenseType::Hotel,
        name: name.to_string(),
        amount: 400,
        date: date.to_string(),
        vat: "80".to_string(),
        pct: 20,
        commentary: "séminaire billed".to_string(),
        file_url: Some(format!("https://test.storage.tld/{id}.jpg")),
        file_name: Some(format!("{id}.jpg")),
        status,
    }
}

/// Four bills in the order the store returns them (not date order).
pub(crate) fn bills() -> Vec<Bill> {
    vec![
        bill("47qAXb6fIm2zOKkLzMro", "encore", "2004-04-04", BillStatus::Pending),
        bill("BeKy5Mo4jkmdfPGYpTxZ", "test1", "2001-01-01", BillStatus::Refused),
        bill("UIUZtnPQvnbFnB0ozvJh", "test3", "2003-03-03", BillStatus::Accepted),
        bill("qcCK3SzECmaZAGRrHjaC", "test2", "2002-02-02", BillStatus::Refused),
    ]
}
