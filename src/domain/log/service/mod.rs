pub mod log_file_service;
