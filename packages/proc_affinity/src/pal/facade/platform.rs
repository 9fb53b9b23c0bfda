use std::fmt::Debug;
use std::num::NonZero;
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::pal::MockPlatform;
use crate::pal::{BUILD_TARGET_PLATFORM, BuildTargetPlatform, Platform};
use crate::{CoreMask, Process};

/// Enum to hide the real/mock choice behind a single wrapper type.
#[derive(Clone)]
pub(crate) enum PlatformFacade {
    Target(&'static BuildTargetPlatform),

    #[cfg(test)]
    Mock(Arc<MockPlatform>),
}

impl PlatformFacade {
    pub(crate) const fn target() -> Self {
        Self::Target(&BUILD_TARGET_PLATFORM)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockPlatform) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Platform for PlatformFacade {
    fn online_processor_count(&self) -> NonZero<usize> {
        match self {
            Self::Target(platform) => platform.online_processor_count(),
            #[cfg(test)]
            Self::Mock(mock) => mock.online_processor_count(),
        }
    }

    fn process_affinity(&self, process: Process) -> crate::Result<CoreMask> {
        match self {
            Self::Target(platform) => platform.process_affinity(process),
            #[cfg(test)]
            Self::Mock(mock) => mock.process_affinity(process),
        }
    }

    fn set_process_affinity(&self, process: Process, mask: CoreMask) -> crate::Result<()> {
        match self {
            Self::Target(platform) => platform.set_process_affinity(process, mask),
            #[cfg(test)]
            Self::Mock(mock) => mock.set_process_affinity(process, mask),
        }
    }
}

impl Debug for PlatformFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Target(inner) => inner.fmt(f),
            #[cfg(test)]
            Self::Mock(inner) => inner.fmt(f),
        }
    }
}
