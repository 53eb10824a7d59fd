pub mod d400_data_browser;

pub use d400_data_browser::ui::DataBrowserDashboard;
