use std::fmt::Debug;
use std::{io, mem};

use libc::{c_long, cpu_set_t, pid_t};

use crate::pal::linux::Bindings;

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in PAL unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

// Real OS bindings are excluded from coverage measurement because:
// 1. They are tested via integration tests running on actual Linux.
// 2. Error paths require OS-level failures that are impractical to trigger in tests.
#[cfg_attr(coverage_nightly, coverage(off))]
impl Bindings for BuildTargetBindings {
    fn sched_getaffinity(&self, pid: pid_t) -> Result<cpu_set_t, io::Error> {
        // SAFETY: All zeroes is a valid cpu_set_t.
        let mut cpuset: cpu_set_t = unsafe { mem::zeroed() };

        // SAFETY: No safety requirements beyond passing valid arguments.
        let result =
            unsafe { libc::sched_getaffinity(pid, size_of::<cpu_set_t>(), &raw mut cpuset) };

        if result == 0 {
            Ok(cpuset)
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn sched_setaffinity(&self, pid: pid_t, cpuset: &cpu_set_t) -> Result<(), io::Error> {
        // SAFETY: No safety requirements beyond passing valid arguments.
        let result = unsafe { libc::sched_setaffinity(pid, size_of::<cpu_set_t>(), cpuset) };

        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn nprocessors_onln(&self) -> c_long {
        // SAFETY: No safety requirements.
        unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) }
    }
}
