mod arg;
mod error;
mod level;

pub use arg::{Arg, ToArgs};
pub use error::{ApexError, ApexResult};
pub use level::{Level, Theme};
