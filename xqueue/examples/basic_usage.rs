//! Basic queue and handle usage, single threaded.
//!
//! Run with: cargo run --example basic_usage

use std::sync::Arc;
use xqueue::{ByteQueue, ErrorKind, OpenOptions};

fn main() {
    let queue: Arc<ByteQueue> = Arc::new(ByteQueue::new());
    println!("queue capacity: {} bytes", queue.capacity());

    // Fill part of the queue
    let written = queue.write(&[1, 2, 3, 4]).expect("write failed");
    println!("wrote {} bytes, {} queued", written, queue.len());

    // Each handle delivers one record, then reports end of stream
    let mut handle = OpenOptions::new().open(&queue);
    let mut out = Vec::new();
    let n = handle.read_into(&mut out).expect("read failed");
    println!("first handle delivered {} bytes: {:?}", n, &out);
    assert_eq!(handle.read_into(&mut out).expect("read failed"), 0);

    // A fresh handle picks up where the stream left off
    let mut next = OpenOptions::new().open(&queue);
    let mut rest = Vec::new();
    next.read_into(&mut rest).expect("read failed");
    println!("second handle delivered: {:?}", rest);

    // Non-blocking handles fail immediately on an empty queue
    let mut nb = OpenOptions::new().with_nonblocking(true).open(&queue);
    let mut sink = Vec::new();
    match nb.read_into(&mut sink) {
        Err(e) if e.kind() == ErrorKind::WouldBlock => {
            println!("non-blocking read on empty queue: would block")
        }
        other => panic!("unexpected result: {:?}", other),
    }

    // Oversized writes truncate to the remaining capacity
    let big = [0xAB; 20];
    let accepted = queue.write(&big).expect("write failed");
    println!("20-byte write accepted {} bytes, queue full: {}", accepted, queue.is_full());
}
