#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Query and modify the processor affinity of a process - the set of CPU cores the operating
//! system is permitted to schedule it on.
//!
//! Three facilities are exposed, each a typed wrapper over the corresponding operating system
//! call: reading the affinity of a process, discovering the number of online logical processors,
//! and constraining a process to a subset of processors. A fourth accessor renders the OS
//! last-error indicator as a string for callers porting from interfaces built around it; the
//! operations here already capture the OS error into their returned [`Error`] values, so new
//! code never needs it.
//!
//! # Quick start
//!
//! ```rust
//! // examples/show_affinity.rs
//! use proc_affinity::{Affinity, Process};
//!
//! let affinity = Affinity::system();
//!
//! println!(
//!     "{} logical processors are online",
//!     affinity.online_processor_count()
//! );
//!
//! match affinity.process_affinity(Process::Current) {
//!     Ok(mask) => {
//!         for processor in mask.processors() {
//!             println!("allowed to run on processor {processor}");
//!         }
//!     }
//!     Err(error) => eprintln!("affinity query failed: {error}"),
//! }
//! ```
//!
//! Pinning works the same way in reverse - build a [`CoreMask`] and apply it:
//!
//! ```rust
//! use proc_affinity::{Affinity, CoreMask, Process};
//!
//! let affinity = Affinity::system();
//! let mask = CoreMask::single(0);
//!
//! if let Err(error) = affinity.set_process_affinity(Process::Current, mask) {
//!     eprintln!("pinning failed: {error}");
//! }
//! ```
//!
//! # Representable processors
//!
//! A [`CoreMask`] is a fixed 64-bit word, one bit per logical processor. Hosts with more than
//! 64 processors online cannot be represented; rather than silently dropping the excess, the
//! affinity operations fail with [`Error::TooManyProcessors`] on such hosts.
//!
//! # Operating system compatibility
//!
//! The native implementation targets Linux (`sched_getaffinity`, `sched_setaffinity` and
//! `sysconf(_SC_NPROCESSORS_ONLN)`). On other operating systems a fallback implementation
//! keeps the API functional with graceful degradation: the processor count comes from
//! [`std::thread::available_parallelism()`], affinity reads report all processors as allowed
//! and affinity writes succeed without any OS-level effect.

mod affinity;
mod core_mask;
mod errors;
mod primitive_types;

pub use affinity::Affinity;
pub use core_mask::CoreMask;
pub use errors::{Error, last_os_error_message};
pub(crate) use errors::Result;
pub use primitive_types::*;

mod pal;
