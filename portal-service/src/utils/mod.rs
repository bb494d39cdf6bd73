pub mod sanitize;
pub mod sharing;

pub use sanitize::{escape_html, sanitize_text};
pub use sharing::share_url;
