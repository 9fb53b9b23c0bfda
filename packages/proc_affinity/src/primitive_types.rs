use derive_more::derive::Display;

/// Identifies a specific logical processor.
///
/// This will match the numeric identifier used by standard tooling of the operating system.
pub type ProcessorId = u32;

/// Identifies the process whose affinity is being queried or modified.
///
/// The operating system convention of "pid 0 means the calling process" is expressed here as an
/// explicit variant instead of a magic number, so callers never need to know about the convention.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "self versus some other process is a complete enumeration"
)]
pub enum Process {
    /// The calling process.
    #[display("current process")]
    Current,

    /// The process with the given OS process identifier.
    #[display("process {_0}")]
    Id(u32),
}
