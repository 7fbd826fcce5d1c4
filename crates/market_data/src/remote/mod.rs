pub mod deals_client;
pub mod local_file;

pub use deals_client::DealsClient;
pub use local_file::LocalFileSource;

pub const DEFAULT_DEALS_URL: &str =
    "https://raw.githubusercontent.com/aiearyn/smart-money-bulk-dashboard/main/bulk_deals.csv";

pub const DEFAULT_LOCAL_PATH: &str = "bulk_deals.csv";
