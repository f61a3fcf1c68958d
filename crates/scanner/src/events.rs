use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_rpc_types::Log as RpcLog;
use alloy_sol_types::{sol, SolEvent};

use crate::DecodeError;

sol! {
    interface IERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);
    }
}

/// A single input of an event declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventField {
    pub name: &'static str,
    pub ty: &'static str,
    pub indexed: bool,
}

/// Declarative layout of an event: its name and ordered inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchema {
    pub name: &'static str,
    pub fields: &'static [EventField],
}

impl EventSchema {
    /// Returns the canonical signature, e.g. `Transfer(address,address,uint256)`.
    pub fn signature(&self) -> String {
        let types = self.fields.iter().map(|f| f.ty).collect::<Vec<_>>();
        format!("{}({})", self.name, types.join(","))
    }

    /// Returns the hash of the signature, emitted as the first topic of every log.
    pub fn topic0(&self) -> B256 {
        keccak256(self.signature())
    }

    /// Number of topics a log of this event carries: the signature plus one per indexed input.
    pub const fn topic_count(&self) -> usize {
        let mut count = 1;
        let mut i = 0;
        while i < self.fields.len() {
            if self.fields[i].indexed {
                count += 1;
            }
            i += 1;
        }
        count
    }
}

/// The ERC20 `Transfer` event, mirroring [`IERC20::Transfer`].
pub const TRANSFER_EVENT: EventSchema = EventSchema {
    name: "Transfer",
    fields: &[
        EventField { name: "from", ty: "address", indexed: true },
        EventField { name: "to", ty: "address", indexed: true },
        EventField { name: "value", ty: "uint256", indexed: false },
    ],
};

/// A decoded ERC20 transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

/// Decodes a `Transfer` log.
///
/// Returns `Ok(None)` for logs that don't have the expected topic count or that carry no data.
/// Indexed addresses are read from the low 20 bytes of their topic. Bytes past the `value` word
/// are ignored.
pub fn decode_transfer(log: &RpcLog) -> Result<Option<TransferRecord>, DecodeError> {
    let topics = log.topics();
    let data = &log.data().data;

    if topics.len() != TRANSFER_EVENT.topic_count() || data.is_empty() {
        return Ok(None);
    }

    let (value,) = IERC20::Transfer::abi_decode_data(data, false)?;

    Ok(Some(TransferRecord {
        from: Address::from_word(topics[1]),
        to: Address::from_word(topics[2]),
        value,
    }))
}

/// Decodes all the well-formed transfers in `logs`, keeping the node's ordering.
///
/// Logs whose payload fails to decode are skipped.
pub fn decode_transfers(logs: &[RpcLog]) -> Vec<TransferRecord> {
    logs.iter()
        .filter_map(|log| match decode_transfer(log) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(
                    tx = ?log.transaction_hash,
                    log_index = ?log.log_index,
                    "error unpacking transfer data: {err}"
                );
                None
            }
        })
        .collect()
}
