use std::fmt::Debug;
use std::num::NonZero;

use crate::{CoreMask, Process};

/// The affinity operations each supported platform provides.
///
/// All operating system access goes through this trait, enabling it to be mocked.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the number of logical processors currently online.
    ///
    /// Queried fresh from the operating system on every call; implementations must not cache
    /// the value, as processors can come online or go offline while the process runs.
    #[must_use]
    fn online_processor_count(&self) -> NonZero<usize>;

    /// Gets the set of processors the given process is currently permitted to run on.
    ///
    /// Membership is determined for each processor index below the online processor count.
    fn process_affinity(&self, process: Process) -> crate::Result<CoreMask>;

    /// Constrains the given process to run only on the processors in the mask.
    ///
    /// Mask bits at or above the online processor count are ignored. On failure, the previous
    /// affinity of the target process is left unchanged by the operating system.
    fn set_process_affinity(&self, process: Process, mask: CoreMask) -> crate::Result<()>;
}
