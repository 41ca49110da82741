pub mod handle;
pub mod model;
pub mod repository;
pub mod repository_pg;
pub mod route;
pub mod schema;
pub mod service;
pub mod storage;

pub use model::{FileResponse, IncomingFile, NewFileRecord, UploadFilesResponse};
pub use repository::FileRepository;
pub use repository_pg::FilePgRepository;
pub use schema::FileEntity;
pub use service::FileService;
pub use storage::FileStorage;
