use soroban_sdk::contracterror;

/// Errors shared by the token, reserve, oracle and router contracts
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SynthError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller is neither the owner nor the registered router
    Unauthorized = 3,
    /// Collateralization ratio would fall below target
    InvariantViolation = 4,
    /// A token pull, push, mint or burn was rejected
    TransferFailure = 5,
    /// Out-of-range tick, zero period or zero amount
    OutOfRange = 6,
    /// Nested call into a guarded operation
    Reentrancy = 7,
    DeadlineExceeded = 8,
    SwapFailure = 9,
    InsufficientOutput = 10,
    LiquidityFailure = 11,
    OracleFailure = 12,
    Overflow = 13,
}

/// Collapse the outcome of a `try_` client call on a foreign contract.
/// Every failure, whatever its origin, becomes `err`.
pub fn settle<T, C, E>(outcome: Result<Result<T, C>, E>, err: SynthError) -> Result<T, SynthError> {
    match outcome {
        Ok(Ok(value)) => Ok(value),
        _ => Err(err),
    }
}

/// Collapse the outcome of a `try_` client call on one of our own contracts.
/// A `SynthError` raised by the callee is passed through unchanged; host or
/// conversion failures become `otherwise`.
pub fn forward<T, C, I>(
    outcome: Result<Result<T, C>, Result<SynthError, I>>,
    otherwise: SynthError,
) -> Result<T, SynthError> {
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(err)) => Err(err),
        _ => Err(otherwise),
    }
}
