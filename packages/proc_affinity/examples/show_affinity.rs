//! We print the number of online logical processors and the set of processors the current
//! process is permitted to run on.
//!
//! On Linux the allowed set can be adjusted before launch to see the difference, e.g.
//! `taskset 0x3 target/debug/examples/show_affinity`.

use proc_affinity::{Affinity, Process};

fn main() {
    let affinity = Affinity::system();

    println!(
        "{} logical processors are online",
        affinity.online_processor_count()
    );

    match affinity.process_affinity(Process::Current) {
        Ok(mask) => {
            println!("current process affinity mask: {mask}");

            for processor in mask.processors() {
                println!("allowed to run on processor {processor}");
            }
        }
        Err(error) => eprintln!("affinity query failed: {error}"),
    }
}
