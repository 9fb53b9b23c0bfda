use std::num::NonZero;
use std::thread;

use new_zealand::nz;

use crate::pal::Platform;
use crate::{CoreMask, Error, Process};

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform = BuildTargetPlatform;

/// Fallback platform implementation for operating systems without native affinity support.
///
/// This provides graceful degradation instead of a compile error:
/// - Processor count comes from `std::thread::available_parallelism()`
/// - Affinity reads report every simulated processor as allowed
/// - Affinity writes succeed but have no OS-level effect
///
/// Code using the crate compiles and runs on any platform, though without actual control
/// over process scheduling.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform;

impl Platform for BuildTargetPlatform {
    fn online_processor_count(&self) -> NonZero<usize> {
        thread::available_parallelism().unwrap_or(nz!(1))
    }

    fn process_affinity(&self, _process: Process) -> crate::Result<CoreMask> {
        let count = self.online_processor_count().get();

        if count > CoreMask::MAX_PROCESSORS {
            return Err(Error::TooManyProcessors { count });
        }

        Ok(CoreMask::up_to(count))
    }

    fn set_process_affinity(&self, _process: Process, _mask: CoreMask) -> crate::Result<()> {
        Ok(())
    }
}
