//! Shared configuration constants for notescrape
//!
//! Default values and fixed platform facts used throughout the pipeline,
//! collected here to avoid magic numbers in the extraction code.

/// Origin of the target platform
///
/// Relative links and root-relative thumbnails resolve against this origin.
pub const PLATFORM_ORIGIN: &str = "https://www.xiaohongshu.com";

/// Sentinel link for items whose anchor could not be resolved
pub const MISSING_LINK: &str = "#";

/// Sentinel author for items whose author could not be resolved
pub const UNKNOWN_AUTHOR: &str = "未知用户";

/// Maximum number of items in any response
pub const MAX_ITEMS: usize = 10;

/// Maximum number of candidate elements handed to field extraction
pub const MAX_CANDIDATES: usize = 15;

/// Maximum accepted keyword length, in characters
pub const MAX_KEYWORD_LENGTH: usize = 100;

/// Titles must be strictly longer than this many characters
pub const MIN_TITLE_CHARS: usize = 5;

/// Titles are truncated to this many characters
pub const MAX_TITLE_CHARS: usize = 100;

/// Titles at or above this length are rejected before truncation
pub const REJECT_TITLE_CHARS: usize = 200;

/// Browser user agent presented to the platform
///
/// Matches a desktop Chrome on macOS; the platform serves its full web
/// feed only to desktop agents.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Browser window and viewport size
pub const VIEWPORT_WIDTH: u32 = 1920;
pub const VIEWPORT_HEIGHT: u32 = 1080;
