//! Message delivery
//!
//! Each handler validates against current state first, then makes every
//! fallible supply call, and writes the module store last. A rejected
//! message therefore never leaves a partial record behind.

use crate::error::{AssetError, Fatal, HandlerError};
use crate::handler::{BlockContext, TxResult};
use crate::keeper::{Keeper, ParamsStore};
use crate::store::KvStore;
use crate::supply::{SupplyKeeper, FEE_COLLECTOR_NAME, MODULE_NAME};
use crate::types::{
    Address, AssetEvent, AssetMsg, Coins, DelayedTransfer, DelayedTransferMsg, IssueMsg, MintMsg,
    Token,
};

/// Apply one message to the keeper.
///
/// Rejections come back as a non-zero [`TxResult`]. `Err` is reserved for
/// invariant violations, which must abort the enclosing block.
pub fn deliver<S, B, P>(
    keeper: &mut Keeper<S, B, P>,
    ctx: &BlockContext,
    msg: &AssetMsg,
) -> Result<TxResult, Fatal>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    let outcome = if keeper.config().is_active(ctx.height) {
        msg.validate_basic()
            .map_err(HandlerError::from)
            .and_then(|()| match msg {
                AssetMsg::Issue(msg) => handle_issue(keeper, msg),
                AssetMsg::Mint(msg) => handle_mint(keeper, msg),
                AssetMsg::DelayedTransfer(msg) => handle_delayed_transfer(keeper, ctx, msg),
            })
    } else {
        Err(AssetError::UnknownRequest(format!(
            "asset related message is not supported until {}",
            keeper.config().token_issue_height
        ))
        .into())
    };

    match outcome {
        Ok(result) => Ok(result),
        Err(HandlerError::Rejected(err)) => {
            log::debug!("{} rejected at height {}: {}", msg.msg_type(), ctx.height, err);
            Ok(TxResult::rejected(&err))
        }
        Err(HandlerError::Fatal(err)) => {
            log::error!("{} hit a fatal store error: {}", msg.msg_type(), err);
            Err(err)
        }
    }
}

fn charge_fee<B: SupplyKeeper>(supply: &mut B, from: &Address, fee: &Coins) -> Result<(), HandlerError> {
    if fee.is_empty() {
        return Ok(());
    }
    supply.send_coins_from_account_to_module(from, FEE_COLLECTOR_NAME, fee)?;
    Ok(())
}

/// Mint into module custody, then pay out to `to`
fn mint_to<B: SupplyKeeper>(supply: &mut B, to: &Address, coins: &Coins) -> Result<(), HandlerError> {
    supply.mint_coins(MODULE_NAME, coins)?;
    supply.send_coins_from_module_to_account(MODULE_NAME, to, coins)?;
    Ok(())
}

fn handle_issue<S, B, P>(keeper: &mut Keeper<S, B, P>, msg: &IssueMsg) -> Result<TxResult, HandlerError>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    let max_decimal = keeper.max_decimal();
    if msg.decimals > max_decimal {
        return Err(AssetError::InvalidDecimal(format!(
            "token decimal {} should be in [0, {}]",
            msg.decimals, max_decimal
        ))
        .into());
    }

    let symbol = msg.symbol.to_lowercase();
    if keeper.is_token_exist(&symbol) {
        return Err(AssetError::DuplicateSymbol(symbol).into());
    }

    let fee = keeper.issue_fee();
    charge_fee(&mut keeper.supply, &msg.from, &fee)?;

    let token = Token::new(
        symbol,
        msg.name.clone(),
        msg.decimals,
        msg.total_supply,
        msg.mintable,
        msg.description.clone(),
        msg.from,
    );
    let minted = token.coins(token.total_supply);
    mint_to(&mut keeper.supply, &msg.from, &minted)?;

    keeper.set_token(&token)?;

    log::info!(
        "Token {} issued by {} with supply {}",
        token.symbol,
        token.owner,
        token.total_supply
    );

    let event = AssetEvent::IssueToken {
        symbol: token.symbol.clone(),
        owner: token.owner,
        minted,
    };
    Ok(TxResult::ok(token.symbol.into_bytes(), vec![event]))
}

fn handle_mint<S, B, P>(keeper: &mut Keeper<S, B, P>, msg: &MintMsg) -> Result<TxResult, HandlerError>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    let symbol = msg.symbol.to_lowercase();
    let mut token = keeper
        .get_token(&symbol)?
        .ok_or_else(|| AssetError::TokenNotFound(symbol.clone()))?;

    if !token.mintable {
        return Err(AssetError::NotMintableToken(symbol).into());
    }
    if token.owner != msg.from {
        return Err(AssetError::UnauthorizedMint {
            symbol,
            owner: token.owner,
        }
        .into());
    }

    let possible = token.mint_headroom();
    if msg.amount > possible {
        return Err(AssetError::InvalidMintAmount(format!(
            "mint amount {} exceeds the possible amount {}",
            msg.amount, possible
        ))
        .into());
    }

    let fee = keeper.mint_fee();
    charge_fee(&mut keeper.supply, &msg.from, &fee)?;

    let minted = token.coins(msg.amount);
    mint_to(&mut keeper.supply, &msg.from, &minted)?;

    token.total_supply += msg.amount;
    keeper.update_token(&token)?;

    log::info!(
        "Minted {} {}; total supply now {}",
        msg.amount,
        token.symbol,
        token.total_supply
    );

    let event = AssetEvent::MintToken {
        symbol: token.symbol,
        owner: token.owner,
        minted,
    };
    Ok(TxResult::ok(Vec::new(), vec![event]))
}

fn handle_delayed_transfer<S, B, P>(
    keeper: &mut Keeper<S, B, P>,
    ctx: &BlockContext,
    msg: &DelayedTransferMsg,
) -> Result<TxResult, HandlerError>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    let matured_time = ctx
        .unix_time()
        .checked_add(msg.delayed_period)
        .ok_or_else(|| {
            AssetError::InvalidDelay(format!(
                "delay {} overflows block time {}",
                msg.delayed_period,
                ctx.unix_time()
            ))
        })?;

    keeper
        .supply
        .send_coins_from_account_to_module(&msg.from, MODULE_NAME, &msg.amount)?;

    let sequence = keeper.next_sequence()?;
    let transfer = DelayedTransfer::new(msg.from, msg.to, msg.amount.clone(), matured_time, sequence);
    keeper.insert_delayed_transfer(&transfer)?;

    log::info!(
        "Delayed transfer {} of {} from {} to {}, matures at {}",
        sequence,
        transfer.amount,
        transfer.from,
        transfer.to,
        matured_time
    );

    let event = AssetEvent::DelayedTransfer {
        sequence,
        from: transfer.from,
        to: transfer.to,
        amount: transfer.amount,
        matured_time,
    };
    Ok(TxResult::ok(sequence.to_string().into_bytes(), vec![event]))
}
