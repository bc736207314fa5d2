pub mod apply;
pub mod export_csv;
pub mod import_products;
pub mod init;
pub mod inspect;
pub mod paginate;

pub use apply::{apply, ApplyArgs};
pub use export_csv::{export_csv, ExportCsvArgs};
pub use import_products::{import_products, ImportProductsArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use paginate::{paginate, PaginateArgs};
