//! Cancelling a reader parked on an empty queue.
//!
//! Run with: cargo run --example interrupt

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use xqueue::{ByteQueue, ErrorKind};

fn main() {
    let queue = Arc::new(ByteQueue::<16>::new());

    let reader = {
        let queue = queue.clone();
        thread::spawn(move || {
            let mut buf = [0u8; 4];
            println!("reader: waiting for data...");
            queue.read(&mut buf)
        })
    };

    thread::sleep(Duration::from_millis(200));
    println!("main: delivering interrupt");
    queue.interrupt();

    match reader.join().expect("reader panicked") {
        Err(e) if e.kind() == ErrorKind::Interrupted => {
            println!("reader: wait interrupted, no bytes moved")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
