//! Use cases orchestrating domain entities through port interfaces

pub mod available_offline;

pub use available_offline::GetFilesAvailableOfflineUseCase;
