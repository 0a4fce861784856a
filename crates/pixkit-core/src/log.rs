/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Stand-in for the `log` crate used when the `log` feature is disabled.
//!
//! Every level is the same macro, accepting anything its `log`
//! counterpart does and expanding to nothing.
//!
//! ```
//! use pixkit_core::log::{trace, warn};
//!
//! trace!("Image width: {}", 10);
//! warn!("{} colormap indexes out of range", 3);
//! ```

// macros exported from a crate always land at its root,
// the aliases below give them a `pixkit_core::log::` path.
pub use crate::{
    __discard_log as debug, __discard_log as error, __discard_log as info,
    __discard_log as trace, __discard_log as warn
};

#[doc(hidden)]
#[macro_export]
macro_rules! __discard_log {
    ($($arg:tt)+) => {};
}
