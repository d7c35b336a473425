//! Page Components

mod home;
mod login;
mod pricing;
mod tool;

pub use home::HomePage;
pub use login::LoginPage;
pub use pricing::PricingPage;
pub use tool::ToolPage;
