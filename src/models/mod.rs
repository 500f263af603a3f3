pub mod book;
pub mod book_request;
pub mod library_info;
pub mod member;
pub mod transaction;

pub use book::{Book, BookDraft, SearchField};
pub use book_request::{BookRequest, RequestDraft, RequestStatus};
pub use library_info::LibraryInfo;
pub use member::{Member, MemberDraft};
pub use transaction::{LoanDetails, Transaction, TransactionStatus};
