//! Account operations
//!
//! Each operation validates its arguments, reads, checks its preconditions
//! and only then writes. The first violation returns; nothing after it runs.

use crate::accessor::BalanceStore;
use crate::config::{ChaincodeConfig, MissingBalancePolicy};
use crate::error::ChaincodeError;
use crate::founder::FounderGuard;
use acctbook_core::{validate_account_key, Balance};
use tracing::{debug, info, warn};

/// Split `args` into exactly `N` positional arguments
pub fn expect_args<const N: usize>(args: &[String]) -> Result<[&str; N], ChaincodeError> {
    if args.len() != N {
        return Err(ChaincodeError::argument_count(N, args.len()));
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

/// Parse a decimal integer argument
pub fn parse_amount(raw: &str) -> Result<i64, ChaincodeError> {
    raw.parse::<Balance>()
        .map(|b| b.value())
        .map_err(|_| ChaincodeError::InvalidAmount(raw.to_string()))
}

/// `init [founder, balance]`
///
/// Stores the founder balance unconditionally and records the founder key.
pub fn initialize(
    config: &ChaincodeConfig,
    store: &mut BalanceStore<'_>,
    args: &[String],
) -> Result<(), ChaincodeError> {
    let [founder, initial] = expect_args::<2>(args)?;
    validate_account_key(founder)?;
    let balance = Balance::new(parse_amount(initial)?);

    store.write(founder, balance)?;
    FounderGuard::new(config).designate(store, founder)?;

    info!(tx_id = %store.tx_id(), founder, %balance, "founder account initialized");
    Ok(())
}

/// `create [key, amount]`
pub fn create(store: &mut BalanceStore<'_>, args: &[String]) -> Result<(), ChaincodeError> {
    let [key, amount] = expect_args::<2>(args)?;
    validate_account_key(key)?;
    let balance = Balance::new(parse_amount(amount)?);

    if store.read_raw(key)?.is_some() {
        return Err(ChaincodeError::AccountExists(key.to_string()));
    }

    store.write(key, balance)?;
    debug!(tx_id = %store.tx_id(), key, %balance, "account created");
    Ok(())
}

/// `query [key]` - returns the stored balance bytes as-is
pub fn query(store: &BalanceStore<'_>, args: &[String]) -> Result<Vec<u8>, ChaincodeError> {
    let [key] = expect_args::<1>(args)?;
    validate_account_key(key)?;

    store
        .read_raw(key)?
        .ok_or_else(|| ChaincodeError::AccountNotFound(key.to_string()))
}

/// `transfer [from, to, amount]`
///
/// Both accounts must exist and neither may end up negative. A transfer
/// from an account to itself is validated and then leaves the balance as is.
pub fn transfer(store: &mut BalanceStore<'_>, args: &[String]) -> Result<(), ChaincodeError> {
    let [from, to, amount] = expect_args::<3>(args)?;
    validate_account_key(from)?;
    validate_account_key(to)?;
    let amount = parse_amount(amount)?;

    let from_balance = store
        .read(from)?
        .ok_or_else(|| ChaincodeError::AccountNotFound(from.to_string()))?;
    let to_balance = store
        .read(to)?
        .ok_or_else(|| ChaincodeError::AccountNotFound(to.to_string()))?;

    let new_from = from_balance
        .checked_sub(amount)
        .ok_or_else(|| ChaincodeError::BalanceOverflow(from.to_string()))?;
    if new_from.is_negative() {
        return Err(ChaincodeError::InsufficientFunds {
            account: from.to_string(),
            balance: from_balance,
            amount,
        });
    }

    if from == to {
        debug!(tx_id = %store.tx_id(), key = from, amount, "self transfer, nothing to write");
        return Ok(());
    }

    let new_to = to_balance
        .checked_add(amount)
        .ok_or_else(|| ChaincodeError::BalanceOverflow(to.to_string()))?;
    if new_to.is_negative() {
        return Err(ChaincodeError::InsufficientFunds {
            account: to.to_string(),
            balance: to_balance,
            amount,
        });
    }

    store.write(from, new_from)?;
    store.write(to, new_to)?;

    debug!(
        tx_id = %store.tx_id(),
        from, to, amount,
        %new_from, %new_to,
        "transfer applied"
    );
    Ok(())
}

/// `unsubscribe [key]`
///
/// Moves the whole balance of `key` into the founder account, then deletes `key`.
pub fn close(
    config: &ChaincodeConfig,
    store: &mut BalanceStore<'_>,
    args: &[String],
) -> Result<(), ChaincodeError> {
    let [key] = expect_args::<1>(args)?;
    validate_account_key(key)?;

    let founder = FounderGuard::new(config).ensure_closable(store, key)?;

    let policy = config.missing_balance_policy;
    let closed = read_for_close(store, key, policy)?;
    let founder_balance = read_for_close(store, &founder, policy)?;

    let absorbed = founder_balance
        .checked_add(closed.value())
        .ok_or_else(|| ChaincodeError::BalanceOverflow(founder.clone()))?;

    store.write(&founder, absorbed)?;
    store.delete(key)?;

    info!(
        tx_id = %store.tx_id(),
        key, founder = %founder,
        %closed, founder_balance = %absorbed,
        "account closed"
    );
    Ok(())
}

/// Balance lookup used by close: missing or unparseable values follow `policy`
fn read_for_close(
    store: &BalanceStore<'_>,
    key: &str,
    policy: MissingBalancePolicy,
) -> Result<Balance, ChaincodeError> {
    match (store.read(key), policy) {
        (Ok(Some(balance)), _) => Ok(balance),
        (Ok(None), MissingBalancePolicy::TreatAsZero) => {
            warn!(tx_id = %store.tx_id(), key, "no balance stored, counting as zero");
            Ok(Balance::ZERO)
        }
        (Ok(None), MissingBalancePolicy::Reject) => {
            Err(ChaincodeError::AccountNotFound(key.to_string()))
        }
        (Err(ChaincodeError::CorruptBalance { .. }), MissingBalancePolicy::TreatAsZero) => {
            warn!(tx_id = %store.tx_id(), key, "unparseable balance, counting as zero");
            Ok(Balance::ZERO)
        }
        (Err(err), _) => Err(err),
    }
}
