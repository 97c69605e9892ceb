pub mod breathe;
pub mod draw;
pub mod init;
pub mod interactive;
pub mod saved;
pub mod today;
