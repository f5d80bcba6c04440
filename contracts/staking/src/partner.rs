use soroban_sdk::{contractclient, Address, Env};
use tessera::ExternalPosition;

/// Read and redeem surface of the protocol whose stake positions can be sold to the ledger.
#[allow(dead_code)]
#[contractclient(name = "PartnerProtocolClient")]
pub trait PartnerProtocol {
    /// Returns `None` once a position was redeemed or if it never existed.
    fn query_position(env: Env, position_id: u64) -> Option<ExternalPosition>;

    /// Shares per unit of the partner asset.
    fn query_share_rate(env: Env) -> i128;

    /// Consumes the position and pays its borrowable value to `recipient`.
    fn redeem(env: Env, owner: Address, position_id: u64, recipient: Address) -> i128;
}
