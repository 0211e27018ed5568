//! Command implementations.

pub mod authorize;
pub mod classify;
pub mod grant;

pub use self::authorize::execute_authorize;
pub use self::classify::execute_classify;
pub use self::grant::execute_grant;
