//! Platform Abstraction Layer (PAL). This is private API: the public types in the crate root
//! wire themselves up to the platform matching the build target, while unit tests substitute
//! mocked platforms and bindings.

mod abstractions;
pub(crate) use abstractions::*;

mod facade;
pub(crate) use facade::*;

#[cfg(all(target_os = "linux", not(miri)))]
mod linux;
#[cfg(all(target_os = "linux", not(miri)))]
pub(crate) use linux::*;

// The fallback implementation is used on operating systems without native affinity support,
// as well as under Miri, where real syscalls are unavailable.
#[cfg(any(miri, not(target_os = "linux")))]
mod fallback;
#[cfg(any(miri, not(target_os = "linux")))]
pub(crate) use fallback::*;
