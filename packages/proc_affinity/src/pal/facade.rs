mod platform;
pub(crate) use platform::*;
