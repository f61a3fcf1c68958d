mod config;
pub use config::{ScanConfig, API_KEY_ENV, DEFAULT_PROVIDER_HOST, PROVIDER_HOST_ENV};

mod errors;
pub use errors::{ConfigError, DecodeError, ScanError};

mod events;
pub use events::{
    decode_transfer, decode_transfers, EventField, EventSchema, TransferRecord, IERC20,
    TRANSFER_EVENT,
};

mod ranking;
pub use ranking::{rank, tally, AddressMetric};

mod scan;
pub use scan::{block_window, scan, transfer_filter, BlockWindow, ScanReport, BLOCK_WINDOW_LEN};

mod source;
pub use source::{RpcSource, TransferSource};
