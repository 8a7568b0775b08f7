mod bill;
mod file;
mod session;

pub use bill::{Bill, BillStatus, ExpenseType};
pub use file::SelectedFile;
pub use session::{Session, UserType};
