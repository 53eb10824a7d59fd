mod column_picker;
mod dashboard;
mod filter_bar;
mod results_table;

pub use dashboard::DataBrowserDashboard;
