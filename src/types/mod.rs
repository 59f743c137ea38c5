pub mod credentials;

pub use credentials::{Credentials, MAX_PASSWORD_LEN, MAX_USERNAME_LEN, User};
