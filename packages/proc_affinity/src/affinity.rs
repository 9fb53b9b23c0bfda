use std::num::NonZero;
use std::sync::OnceLock;

use crate::pal::{Platform, PlatformFacade};
use crate::{CoreMask, Process, Result};

/// The process-wide instance backed by the real operating system, initialized on first access.
static SYSTEM: OnceLock<Affinity> = OnceLock::new();

/// Handle to the operating system's process affinity facilities.
///
/// Obtain the instance backed by the real operating system via [`Affinity::system()`]. Every
/// operation is a stateless request against OS state: nothing is cached, and there is no
/// multi-step protocol between calls.
///
/// # Example
///
/// ```
/// use proc_affinity::{Affinity, Process};
///
/// let affinity = Affinity::system();
///
/// println!(
///     "{} logical processors are online",
///     affinity.online_processor_count()
/// );
///
/// match affinity.process_affinity(Process::Current) {
///     Ok(mask) => println!("allowed to run on {mask}"),
///     Err(error) => eprintln!("affinity query failed: {error}"),
/// }
/// ```
#[derive(Debug)]
pub struct Affinity {
    platform: PlatformFacade,
}

impl Affinity {
    /// Returns the handle backed by the real operating system.
    #[must_use]
    pub fn system() -> &'static Self {
        SYSTEM.get_or_init(|| Self {
            platform: PlatformFacade::target(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self { platform }
    }

    /// The number of logical processors currently online.
    ///
    /// Queried fresh from the operating system on every call, since processors can come online
    /// or go offline while the process runs. The value bounds the processor indexes that the
    /// affinity operations consider; on hosts where it exceeds [`CoreMask::MAX_PROCESSORS`],
    /// those operations return [`Error::TooManyProcessors`][crate::Error::TooManyProcessors].
    #[must_use]
    pub fn online_processor_count(&self) -> NonZero<usize> {
        self.platform.online_processor_count()
    }

    /// The set of processors the given process is currently permitted to run on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryFailed`][crate::Error::QueryFailed] when the operating system
    /// rejects the query, typically because the process does not exist or the caller lacks
    /// permission, and [`Error::TooManyProcessors`][crate::Error::TooManyProcessors] when more
    /// processors are online than a [`CoreMask`] can represent.
    pub fn process_affinity(&self, process: Process) -> Result<CoreMask> {
        self.platform.process_affinity(process)
    }

    /// Constrains the given process to run only on the processors in `mask`.
    ///
    /// Mask bits at or above [`online_processor_count()`][Self::online_processor_count] are
    /// ignored. The effect persists in OS scheduling state until changed again or the target
    /// process exits; there is no rollback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpdateFailed`][crate::Error::UpdateFailed] when the operating system
    /// rejects the update (nonexistent process, insufficient permission, or a mask that leaves
    /// the process with no usable processor), and
    /// [`Error::TooManyProcessors`][crate::Error::TooManyProcessors] when more processors are
    /// online than a [`CoreMask`] can represent. On failure, the previous affinity of the
    /// target process is left unchanged.
    pub fn set_process_affinity(&self, process: Process, mask: CoreMask) -> Result<()> {
        self.platform.set_process_affinity(process, mask)
    }
}
