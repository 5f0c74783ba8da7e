pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod flattener;
pub mod importer;
pub mod injector;
pub mod logging;
pub mod scanner;
pub mod sitemap;
pub mod slug;
