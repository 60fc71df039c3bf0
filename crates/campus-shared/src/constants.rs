/// Application name
pub const APP_NAME: &str = "Campus Channels";

/// Stars credited to a professor for each new subscriber
pub const SUBSCRIPTION_STAR_REWARD: u32 = 5;

/// Subscription price in Algerian dinars
pub const SUBSCRIPTION_PRICE_DZD: u64 = 100;

/// Meeting link assigned to freshly created channels
pub const PLACEHOLDER_MEET_LINK: &str = "https://meet.google.com/new";

/// Persisted key holding the JSON-serialised session user
pub const SESSION_KEY: &str = "currentUser";

/// Persisted key holding the JSON-serialised profile settings
pub const SETTINGS_KEY: &str = "profileSettings";

/// Email of the seeded demo student account
pub const DEMO_STUDENT_EMAIL: &str = "demo.student@way.dz";

/// Email of the seeded demo professor account
pub const DEMO_PROFESSOR_EMAIL: &str = "demo.professor@way.dz";

/// Default splash screen duration in milliseconds
pub const DEFAULT_SPLASH_MS: u64 = 2_000;
