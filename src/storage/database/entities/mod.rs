/// Batch entity module
pub mod batch;
/// Password reset token entity module
pub mod password_reset_token;
/// User entity module
pub mod user;
/// User session entity module
pub mod user_session;

pub use batch::Entity as Batch;
pub use password_reset_token::Entity as PasswordResetToken;
pub use user::Entity as User;
// UserSession is available but not currently used
#[allow(unused_imports)]
pub use user_session::Entity as UserSession;
