// Resume CRUD, validation at the write boundary, and file upload pre-fill.

pub mod handlers;
pub mod upload;
pub mod validation;
