mod client;
mod contact;

pub use client::*;
pub use contact::*;
