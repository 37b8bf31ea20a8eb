pub mod country;
pub mod slug;
pub mod url;

pub use country::detect_country;
pub use slug::slugify;
pub use url::build_output_url;
