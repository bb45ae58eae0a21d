pub mod log_file_fs_adapter;
pub mod log_file_repository_trait;
