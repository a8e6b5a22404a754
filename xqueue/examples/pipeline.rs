//! A producer and a consumer thread streaming a payload through one
//! 16-byte queue.
//!
//! Run with: cargo run --example pipeline

use std::sync::Arc;
use std::thread;
use xqueue::ByteQueue;

const PAYLOAD_SIZE: usize = 64 * 1024; // 64 KB

fn main() {
    let queue = Arc::new(ByteQueue::<16>::new());
    let payload: Vec<u8> = (0..PAYLOAD_SIZE).map(|i| (i % 251) as u8).collect();

    let producer = {
        let queue = queue.clone();
        let payload = payload.clone();
        thread::spawn(move || {
            let mut sent = 0;
            while sent < payload.len() {
                sent += queue.write(&payload[sent..]).expect("write failed");
            }
            println!("producer done: {} bytes", sent);
        })
    };

    let mut received = Vec::with_capacity(PAYLOAD_SIZE);
    let mut buf = [0u8; 16];
    while received.len() < PAYLOAD_SIZE {
        let n = queue.read(&mut buf).expect("read failed");
        received.extend_from_slice(&buf[..n]);
    }

    producer.join().expect("producer panicked");

    if received == payload {
        println!("consumer done: {} bytes, stream intact", received.len());
    } else {
        println!("consumer done: stream CORRUPTED");
    }
}
