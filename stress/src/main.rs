use log::info;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use xqueue::{ByteQueue, ErrorKind};

const DATA_SIZE: usize = 256 * 1024; // 256 KB

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let queue = Arc::new(ByteQueue::<16>::new());
    let data: Vec<u8> = (0..DATA_SIZE).map(|i| (i % 251) as u8).collect();
    info!("Streaming {} KB through a {}-byte queue...", DATA_SIZE / 1024, queue.capacity());

    let producer = {
        let queue = queue.clone();
        let data = data.clone();
        thread::spawn(move || {
            let mut sent = 0;
            while sent < data.len() {
                sent += queue.write(&data[sent..]).expect("Failed to write");
            }
            info!("Producer finished: {} KB", sent / 1024);
        })
    };

    let start = Instant::now();
    let mut received = Vec::with_capacity(DATA_SIZE);
    let mut buf = [0u8; 16];
    while received.len() < DATA_SIZE {
        let n = queue.read(&mut buf).expect("Failed to read");
        received.extend_from_slice(&buf[..n]);
    }
    let elapsed = start.elapsed();
    let speed = (received.len() as f64 / 1024.0) / elapsed.as_secs_f64();

    producer.join().expect("Producer panicked");

    if received == data {
        info!("Data matches exactly");
    } else {
        info!("Data does not match");
    }

    info!("=== Relay Complete ===");
    info!("Total relayed: {} KB", received.len() / 1024);
    info!("Time: {:.2} seconds", elapsed.as_secs_f64());
    info!("Speed: {:.2} KB/s", speed);

    // Park a reader on the now-empty queue and cancel it
    info!("Parking a reader, then interrupting it...");
    let parked = {
        let queue = queue.clone();
        thread::spawn(move || {
            let mut buf = [0u8; 4];
            queue.read(&mut buf)
        })
    };

    thread::sleep(Duration::from_millis(100));
    queue.interrupt();

    match parked.join().expect("Reader panicked") {
        Err(e) if e.kind() == ErrorKind::Interrupted => info!("Parked reader interrupted cleanly"),
        other => info!("Unexpected reader result: {:?}", other),
    }

    info!("Stress run finished");
}
