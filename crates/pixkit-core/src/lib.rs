/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all pixkit crates
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Colorspace, bit depth and byte order information shared by images
//! - Image decoder and encoder options
//! - A logging shim that compiles to nothing when the `log` feature is off
//!
//! This library is `#[no_std]` with the `alloc` crate needed for `Vec`
//!
//! # Features
//!  - `std`: Enables readers and writers backed by `std::io` types.
//!  - `log`: Routes the logging macros to the `log` crate.
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
#[cfg(not(feature = "log"))]
pub mod log;
#[cfg(feature = "log")]
pub use log;
pub mod options;
mod serde;
