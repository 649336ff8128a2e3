//! Constants used throughout the TUI module
//!
//! This module centralizes magic numbers and strings to reduce duplication
//! and make values easier to maintain.

/// Smallest width a flexible column (Message/URL/Source-Path) may get
pub const MIN_FLEX_COLUMN_WIDTH: u16 = 20;

/// Horizontal cells kept free for borders and column spacing
pub const BORDER_RESERVE: u16 = 10;

/// Rows of the table area not used for data (two borders plus the header row)
pub const TABLE_CHROME_ROWS: u16 = 3;

/// Default Name column width
pub const DEFAULT_COLUMNS_NAME: u16 = 30;

/// Default Status column width
pub const DEFAULT_COLUMNS_STATUS: u16 = 12;

/// Status labels longer than this are truncated
pub const STATUS_MAX_CHARS: usize = 12;
/// Characters of a truncated status label kept before the ellipsis
pub const STATUS_KEEP_CHARS: usize = 9;

/// Messages longer than this are truncated
pub const MESSAGE_MAX_CHARS: usize = 35;
/// Characters of a truncated message kept before the ellipsis
pub const MESSAGE_KEEP_CHARS: usize = 32;

/// Status message timeout in seconds
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 4;

/// Header height (one content line plus borders)
pub const HEADER_HEIGHT: u16 = 3;

/// Footer height (one content line plus borders)
pub const FOOTER_HEIGHT: u16 = 3;

/// How long the event loop waits for input before checking messages
pub const EVENT_POLL_MS: u64 = 100;

/// Namespace the `a` toggle returns to when started on all namespaces
pub const FALLBACK_NAMESPACE: &str = "flux-system";
