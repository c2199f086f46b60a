mod responses;
pub mod routes;

pub use responses::{store_error_response, ContentResponse, MutationResponse};
