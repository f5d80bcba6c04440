use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 600,
    ConfigNotSet = 601,
    AdminNotSet = 602,
    Unauthorized = 603,
    InvalidConfig = 604,
    InvalidAmount = 605,
    UnsupportedAsset = 606,
    LaunchWindowClosed = 607,
    StakeAlreadyExists = 608,
    StakeNotFound = 609,
    ExternalPositionNotFound = 610,
    PositionNotOwned = 611,
    InvalidShareRate = 612,
    TransferFailed = 613,
    ContractMathError = 614,
}
