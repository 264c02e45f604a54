pub mod providers;
pub mod sheet_store;

pub use sheet_store::{SheetStoreClient, StoreError};
