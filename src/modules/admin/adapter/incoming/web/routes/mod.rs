mod login_admin;
mod logout_admin;

pub use login_admin::*;
pub use logout_admin::*;
