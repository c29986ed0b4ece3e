pub mod error;
pub mod html;
