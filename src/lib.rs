pub mod decimal;
pub mod eip712;
pub mod env;
pub mod error;
pub mod instruments;
pub mod message;
pub mod payload;
pub mod signer;
pub mod types;

// Re-export commonly used types
pub use decimal::{to_scaled_u64, PRICE_SCALE};
pub use eip712::{
    hash_domain, hash_order, keccak256, recover_signer, signing_digest, type_hash, Address,
    Eip712Domain, OrderSignature, CONTRACT_NAME, CONTRACT_VERSION,
};
pub use env::Environment;
pub use error::{Result, SignerError};
pub use instruments::{fetch_instruments, load_instruments_file, save_instruments_file};
pub use message::build_order_message;
pub use payload::build_signed_payload;
pub use signer::{sign_order, sign_order_with_chain_id, SigningResult, TypedData};
pub use types::{
    Instrument, InstrumentMap, LegMessage, OrderLegRequest, OrderMessage, OrderRequest,
    SignatureParams, TimeInForce,
};

/// Initialize logging for the library
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}
