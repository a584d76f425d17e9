pub mod app;
pub mod csv_loader;
pub mod driver;
pub mod logging;
pub mod settings;
pub mod utils;
pub mod view;

pub use app::run_session;
pub use driver::ConversionDriver;
