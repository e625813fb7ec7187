pub mod common;
pub mod parser;
pub mod rpc;
pub mod verifier;
