use std::mem;
use std::num::NonZero;

use libc::pid_t;

use crate::pal::Platform;
use crate::pal::linux::{Bindings, BindingsFacade};
use crate::{CoreMask, Error, Process, ProcessorId};

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform =
    BuildTargetPlatform::new(BindingsFacade::target());

/// The platform that matches the crate's build target.
///
/// You would only use a different platform in unit tests that need to mock the platform.
/// Even then, whenever possible, unit tests should use the real platform for maximum realism.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform {
    bindings: BindingsFacade,
}

impl Platform for BuildTargetPlatform {
    fn online_processor_count(&self) -> NonZero<usize> {
        let count = self.bindings.nprocessors_onln();

        usize::try_from(count)
            .ok()
            .and_then(NonZero::new)
            .expect("OS reported a nonpositive online processor count")
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "loop bound is validated to be at most 64, which fits any processor ID"
    )]
    fn process_affinity(&self, process: Process) -> crate::Result<CoreMask> {
        let count = self.representable_processor_count()?;

        let cpuset = self
            .bindings
            .sched_getaffinity(to_raw_pid(process))
            .map_err(|source| Error::QueryFailed { process, source })?;

        // Accumulate into an explicitly empty mask so no stale bits can leak in.
        let mut mask = CoreMask::EMPTY;
        for processor in 0..count {
            // SAFETY: No safety requirements.
            if unsafe { libc::CPU_ISSET(processor, &cpuset) } {
                mask.insert(processor as ProcessorId);
            }
        }

        Ok(mask)
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "loop bound is validated to be at most 64, which fits any processor ID"
    )]
    fn set_process_affinity(&self, process: Process, mask: CoreMask) -> crate::Result<()> {
        let count = self.representable_processor_count()?;

        // SAFETY: All zeroes is a valid cpu_set_t.
        let mut cpuset: libc::cpu_set_t = unsafe { mem::zeroed() };

        for processor in 0..count {
            if mask.contains(processor as ProcessorId) {
                // SAFETY: No safety requirements.
                unsafe {
                    libc::CPU_SET(processor, &mut cpuset);
                }
            }
        }

        self.bindings
            .sched_setaffinity(to_raw_pid(process), &cpuset)
            .map_err(|source| Error::UpdateFailed { process, source })
    }
}

impl BuildTargetPlatform {
    pub(super) const fn new(bindings: BindingsFacade) -> Self {
        Self { bindings }
    }

    // A mask bit exists only for processor indexes below 64, so both conversion directions
    // refuse to run when the mask cannot represent every online processor.
    fn representable_processor_count(&self) -> crate::Result<usize> {
        let count = self.online_processor_count().get();

        if count > CoreMask::MAX_PROCESSORS {
            return Err(Error::TooManyProcessors { count });
        }

        Ok(count)
    }
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "OS process identifiers fit in pid_t; values beyond it do not name real processes \
        and simply fail the syscall"
)]
fn to_raw_pid(process: Process) -> pid_t {
    match process {
        // 0 means the calling process for both affinity syscalls.
        Process::Current => 0,
        Process::Id(pid) => pid as pid_t,
    }
}

#[cfg(test)]
mod tests {
    use new_zealand::nz;

    use crate::pal::linux::MockBindings;

    use super::*;

    fn cpuset_from<const PROCESSOR_COUNT: usize>(
        processors: [ProcessorId; PROCESSOR_COUNT],
    ) -> libc::cpu_set_t {
        // SAFETY: Zero-initialized CPU set is correct.
        let mut cpuset: libc::cpu_set_t = unsafe { mem::zeroed() };

        for processor in processors {
            // SAFETY: No safety requirements.
            unsafe {
                libc::CPU_SET(processor as usize, &mut cpuset);
            }
        }

        cpuset
    }

    #[test]
    fn online_processor_count_comes_from_sysconf() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().times(1).returning(|| 8);

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert_eq!(platform.online_processor_count(), nz!(8));
    }

    #[test]
    fn online_processor_count_is_not_cached() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().times(2).returning(|| 4);

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert_eq!(platform.online_processor_count(), nz!(4));
        assert_eq!(platform.online_processor_count(), nz!(4));
    }

    #[test]
    #[should_panic]
    fn nonpositive_processor_count_panics() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| -1);

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        drop(platform.online_processor_count());
    }

    #[test]
    fn process_affinity_converts_members_below_count() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 4);
        bindings
            .expect_sched_getaffinity()
            .withf(|pid| *pid == 0)
            .times(1)
            .returning(|_| Ok(cpuset_from([0, 2])));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.process_affinity(Process::Current).unwrap();
        assert_eq!(mask.bits(), 0b0101);
    }

    #[test]
    fn process_affinity_ignores_members_at_or_above_count() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 2);
        bindings
            .expect_sched_getaffinity()
            .times(1)
            .returning(|_| Ok(cpuset_from([0, 1, 2, 3])));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.process_affinity(Process::Current).unwrap();
        assert_eq!(mask.bits(), 0b0011);
    }

    #[test]
    fn process_affinity_targets_the_requested_pid() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 4);
        bindings
            .expect_sched_getaffinity()
            .withf(|pid| *pid == 1234)
            .times(1)
            .returning(|_| Ok(cpuset_from([1])));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.process_affinity(Process::Id(1234)).unwrap();
        assert_eq!(mask.bits(), 0b0010);
    }

    #[test]
    fn process_affinity_surfaces_os_error() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 4);
        bindings
            .expect_sched_getaffinity()
            .times(1)
            .returning(|_| Err(std::io::Error::from_raw_os_error(libc::ESRCH)));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let error = platform.process_affinity(Process::Id(999_999)).unwrap_err();
        assert!(matches!(
            error,
            Error::QueryFailed {
                process: Process::Id(999_999),
                ..
            }
        ));
    }

    #[test]
    fn set_process_affinity_builds_matching_cpuset() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 4);

        let expected_set = cpuset_from([0, 2]);
        bindings
            .expect_sched_setaffinity()
            .withf(move |pid, cpuset| {
                // SAFETY: No safety requirements.
                *pid == 0 && unsafe { libc::CPU_EQUAL(cpuset, &expected_set) }
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        platform
            .set_process_affinity(Process::Current, CoreMask::from_bits(0b0101))
            .unwrap();
    }

    #[test]
    fn set_process_affinity_ignores_bits_at_or_above_count() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 2);

        let expected_set = cpuset_from([1]);
        bindings
            .expect_sched_setaffinity()
            .withf(move |_, cpuset| {
                // SAFETY: No safety requirements.
                unsafe { libc::CPU_EQUAL(cpuset, &expected_set) }
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        // Bits 2 and 5 name processors that are not online; only bit 1 survives.
        platform
            .set_process_affinity(Process::Current, CoreMask::from_bits(0b100110))
            .unwrap();
    }

    #[test]
    fn set_process_affinity_targets_the_requested_pid() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 4);
        bindings
            .expect_sched_setaffinity()
            .withf(|pid, _| *pid == 4321)
            .times(1)
            .returning(|_, _| Ok(()));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        platform
            .set_process_affinity(Process::Id(4321), CoreMask::single(0))
            .unwrap();
    }

    #[test]
    fn set_process_affinity_surfaces_os_error() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 4);
        bindings
            .expect_sched_setaffinity()
            .times(1)
            .returning(|_, _| Err(std::io::Error::from_raw_os_error(libc::EINVAL)));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let error = platform
            .set_process_affinity(Process::Current, CoreMask::EMPTY)
            .unwrap_err();
        assert!(matches!(
            error,
            Error::UpdateFailed {
                process: Process::Current,
                ..
            }
        ));
    }

    #[test]
    fn unrepresentable_host_is_rejected_before_any_syscall() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_onln().returning(|| 96);
        // Neither affinity syscall may be reached.

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.process_affinity(Process::Current),
            Err(Error::TooManyProcessors { count: 96 })
        ));
        assert!(matches!(
            platform.set_process_affinity(Process::Current, CoreMask::single(0)),
            Err(Error::TooManyProcessors { count: 96 })
        ));
    }

    #[test]
    fn round_trip_through_real_bindings() {
        // Maximum realism: exercise the real syscalls against the current process,
        // restoring the original affinity afterwards.
        let platform = BuildTargetPlatform::new(BindingsFacade::target());

        if platform.online_processor_count().get() > CoreMask::MAX_PROCESSORS {
            eprintln!("skipping: host has more processors than a core mask can represent");
            return;
        }

        let original = platform.process_affinity(Process::Current).unwrap();
        assert!(!original.is_empty());

        let _restore = scopeguard::guard(original, |mask| {
            platform.set_process_affinity(Process::Current, mask).unwrap();
        });

        let first = original
            .processors()
            .next()
            .expect("a running process has at least one allowed processor");
        let single = CoreMask::single(first);

        platform.set_process_affinity(Process::Current, single).unwrap();
        assert_eq!(platform.process_affinity(Process::Current).unwrap(), single);
    }
}
