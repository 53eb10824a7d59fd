pub mod auth_callback;
pub mod forgot_password;
pub mod form_message;
pub mod reset_password;
pub mod sign_in;
pub mod sign_up;
