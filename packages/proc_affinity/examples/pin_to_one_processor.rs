//! We pin the current process to a single processor, demonstrate that the operating system
//! reports the narrowed affinity, then restore the original mask.

use proc_affinity::{Affinity, CoreMask, Process};

fn main() {
    let affinity = Affinity::system();

    let original = match affinity.process_affinity(Process::Current) {
        Ok(mask) => mask,
        Err(error) => {
            eprintln!("affinity query failed: {error}");
            return;
        }
    };

    println!("original affinity: {original}");

    let first = original
        .processors()
        .next()
        .expect("a running process is always allowed at least one processor");
    let pinned = CoreMask::single(first);

    if let Err(error) = affinity.set_process_affinity(Process::Current, pinned) {
        eprintln!("pinning failed: {error}");
        return;
    }

    let narrowed = affinity
        .process_affinity(Process::Current)
        .expect("affinity was readable a moment ago");
    println!("pinned to processor {first}, affinity now: {narrowed}");

    affinity
        .set_process_affinity(Process::Current, original)
        .expect("restoring a previously valid mask cannot be rejected");
    println!("restored original affinity");
}
