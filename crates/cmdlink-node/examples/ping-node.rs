//! Minimal node — answers Ping with Ok and everything else with
//! IllegalCommand.
//!
//! Run with:
//!   cargo run --example ping-node
//!
//! In another terminal, exercise it with the wire crate's `send_and_await`
//! or any client speaking the command layout.

use std::net::{Ipv4Addr, SocketAddrV4};

use cmdlink_node::NodeServer;
use cmdlink_wire::{CommandCode, CommandFrame, Frame, ResultCode, ResultFrame};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server = NodeServer::bind(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 7878))?;
    eprintln!("Listening on {}", server.local_addr());

    server.serve(&|command: CommandFrame| match command.code() {
        CommandCode::Ping => ResultFrame::ok_empty(),
        other => {
            eprintln!("Refusing {other:?}");
            ResultFrame::new(ResultCode::IllegalCommand, Frame::empty())
        }
    })?;
    Ok(())
}
