pub mod session;
pub mod web;

pub use session::{PageCapture, Session};
pub use web::WebDriverSession;
