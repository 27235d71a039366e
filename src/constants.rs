// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
pub const DATABASE_FILE: &str = "cobra_amigo.db";

// Session configuration
pub const SESSION_NAME: &str = "cobra_session";
pub const SESSION_EXPIRY_DAYS: i64 = 30;
pub const MIN_SESSION_SECRET_LENGTH: usize = 64;
pub const SESSION_USER_ID_KEY: &str = "user_id";
pub const SESSION_USERNAME_KEY: &str = "username";
pub const AUTH_EVENTS_CAPACITY: usize = 64;

// Owner debt list cache
pub const MAX_CACHED_OWNERS: usize = 1024;

// Validation limits
pub const MAX_DEBTOR_NAME_LENGTH: usize = 255;
pub const MAX_PIX_KEY_LENGTH: usize = 255;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MIN_USERNAME_LENGTH: usize = 4;
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Debt page
pub const OVERDUE_AFTER_DAYS: i64 = 7;
pub const LONG_OVERDUE_AFTER_DAYS: i64 = 30;
pub const CURRENCY_PREFIX: &str = "R$";
pub const PIX_PAYLOAD_SEPARATOR: char = '|';
pub const QR_SIZE_PX: u32 = 200;
pub const MESSAGE_ROTATION_SECS: u64 = 4;
pub const BANNER_WINDOW: usize = 3;

// Error messages
pub const ERR_DATABASE_OPERATION: &str = "Database operation failed";
pub const ERR_INVALID_SESSION: &str = "Invalid session";
pub const ERR_UNAUTHORIZED: &str = "Not logged in";
pub const ERR_DEBT_NOT_FOUND: &str = "Cobrança não encontrada!";
