/// Constants used throughout the filegate codebase
// Environment variable names
pub const FILEGATE_SECRET_VAR: &str = "FILEGATE_TOKEN_SECRET";
pub const FILEGATE_LISTEN_VAR: &str = "FILEGATE_LISTEN";
pub const FILEGATE_STORAGE_ROOT_VAR: &str = "FILEGATE_STORAGE_ROOT";
pub const FILEGATE_ADMIN_TOKEN_VAR: &str = "FILEGATE_ADMIN_TOKEN";
pub const FILEGATE_DEFAULT_TTL_VAR: &str = "FILEGATE_DEFAULT_TTL";
pub const FILEGATE_LOG_VAR: &str = "FILEGATE_LOG";

// Token lifetime applied when the issuance request carries no TTL
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 300;

// Wire format separators. The payload separator must never appear in
// percent-encoded field output; the segment separator must never appear in
// the base64url-no-pad alphabet.
pub const PAYLOAD_FIELD_SEPARATOR: char = '|';
pub const TOKEN_SEGMENT_SEPARATOR: char = '.';

// Placeholder secret shipped for local development. Startup warns loudly
// whenever it is still in effect.
pub const INSECURE_DEFAULT_SECRET: &str = "change-me";

// Default listen address for the HTTP server
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
