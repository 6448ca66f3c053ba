pub mod data_loader;
pub mod csv_data_loader;
pub mod json_data_loader;
pub mod factory;

pub use data_loader::{DataLoader, LoadError, RawRecord, RawTable, RawValue};
pub use csv_data_loader::CsvDataLoader;
pub use json_data_loader::JsonDataLoader;
pub use factory::DataLoaderFactory;
