pub mod cache;
pub mod client;
pub mod course;
pub mod course_selector;
pub mod creds;
pub mod endpoint;
pub mod error;
pub mod submission;
pub mod user;

mod util;

pub use util::DEFAULT_BASE_URL;
