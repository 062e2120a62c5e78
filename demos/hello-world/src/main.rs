//! Hello World example for breeze.
//!
//! This example walks the in-process channel lifecycle end to end:
//! - Building a channel builder by name
//! - The no-op compatibility setters from the shared contract
//! - Transport factories sharing the pooled timer
//! - Caller-supplied executors
//! - Closing factories

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use breeze::{
    ChannelBuilder, ChannelError, EndpointAddress, InProcessAddress, InProcessChannelBuilder,
    Timer, TransportOptions,
};

fn main() -> Result<(), ChannelError> {
    println!("Breeze In-Process Channel Example");
    println!("=================================\n");

    // A process-unique endpoint name for this run
    let addr = InProcessAddress::unique();
    println!("Endpoint: {addr}");

    // Host-based entry points cannot describe an in-process endpoint
    println!("\nEntry points:");
    match InProcessChannelBuilder::for_target("dns:///orders") {
        Ok(_) => println!("  for_target unexpectedly succeeded"),
        Err(e) => println!("  for_target(..) = Error: {e}"),
    }
    match InProcessChannelBuilder::for_address("localhost", 9000) {
        Ok(_) => println!("  for_address unexpectedly succeeded"),
        Err(e) => println!("  for_address(..) = Error: {e}"),
    }

    let builder = InProcessChannelBuilder::for_name(addr.name())?
        .use_plaintext()
        .keep_alive_time(Duration::from_secs(30))
        .max_inbound_metadata_size(16 * 1024)?;
    println!("  for_name(\"{}\") = ok", addr.name());

    // Two factories from one builder share one pooled timer
    let first = builder.build_transport_factory();
    let second = builder.build_transport_factory();
    println!("\nPooled timer:");
    println!("  first.uses_shared_timer() = {}", first.uses_shared_timer());
    let shared = Arc::ptr_eq(&first.scheduled_executor(), &second.scheduled_executor());
    println!("  factories share one timer = {shared}");

    // Create a transport for one connection attempt
    let endpoint = EndpointAddress::from(addr.clone());
    let options = TransportOptions::new().user_agent("hello-world/0.1");
    let transport = first.new_transport(&endpoint, &options)?;
    println!("\nTransport:");
    println!("  target     = {}", transport.target());
    println!("  authority  = {}", transport.authority());
    println!("  user agent = {}", transport.user_agent().unwrap_or("-"));

    // The channel's timer runs delayed work
    let timer = first.scheduled_executor();
    let (tx, rx) = mpsc::channel();
    timer.schedule(
        Duration::from_millis(10),
        Box::new(move || {
            let _ = tx.send("tick");
        }),
    );
    println!("  timer says = {}", rx.recv().unwrap_or("nothing"));

    // Close is idempotent and one-way
    println!("\nClosing:");
    first.close();
    first.close();
    match first.new_transport(&endpoint, &options) {
        Ok(_) => println!("  closed factory unexpectedly produced a transport"),
        Err(e) => println!("  after close: Error: {e}"),
    }
    second.close();

    // A caller-supplied executor stays with the caller
    let my_timer = Arc::new(Timer::new());
    let custom = InProcessChannelBuilder::for_name(addr.name())?
        .scheduled_executor(my_timer.clone())
        .build_transport_factory();
    println!("\nCaller-supplied executor:");
    println!("  custom.uses_shared_timer() = {}", custom.uses_shared_timer());
    custom.close();
    println!("  executor survived close    = {}", !my_timer.is_shutdown());
    my_timer.shutdown();

    println!("\nExample completed successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_lifecycle() {
        let addr = InProcessAddress::unique();
        let factory = InProcessChannelBuilder::for_name(addr.name())
            .unwrap()
            .build_transport_factory();
        let endpoint = EndpointAddress::from(addr);

        assert!(
            factory
                .new_transport(&endpoint, &TransportOptions::new())
                .is_ok()
        );

        factory.close();
        assert!(
            factory
                .new_transport(&endpoint, &TransportOptions::new())
                .is_err()
        );
    }

    #[test]
    fn test_walkthrough_runs() {
        main().unwrap();
    }
}
