//! Data transfer objects for the Web API.

mod request;
mod response;

pub use request::{CreateUserRequest, MailListQuery, SaveDraftRequest, SendMailRequest, UserListQuery};
pub use response::{ApiResponse, IdResponse, MailResponse, UserResponse};
