pub mod db;
pub mod ids;
pub mod rate_limit;
pub mod time;
pub mod verification;

pub use ids::RandomBlobIdGenerator;
pub use rate_limit::FixedWindowRateLimiter;
pub use time::SystemClock;
pub use verification::RecaptchaVerifier;
