pub mod checkout;
pub mod d400_data_browser;
