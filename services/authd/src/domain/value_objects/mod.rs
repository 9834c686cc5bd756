//! 值对象

mod password;
mod username;

pub use password::*;
pub use username::*;
