pub mod authorization;
pub mod grpc_bank_server;
pub mod handlers;

pub use grpc_bank_server::BankGrpcService;
