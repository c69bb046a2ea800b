pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use string_utils::{char_len, collapse_whitespace, is_numeric_or_blank, safe_truncate_chars};
pub use url_utils::{absolutize, absolutize_platform, is_valid_url};
