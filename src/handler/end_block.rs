//! Block-end maturity scheduler

use crate::error::Fatal;
use crate::handler::BlockContext;
use crate::keeper::{Keeper, ParamsStore};
use crate::store::KvStore;
use crate::supply::{SupplyKeeper, MODULE_NAME};
use crate::types::AssetEvent;

/// What one scheduler run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndBlockReport {
    /// Released sequences, in release order
    pub released: Vec<i64>,
    /// Due transfers whose release failed; they stay stored for the next block
    pub deferred: Vec<i64>,
    pub events: Vec<AssetEvent>,
}

/// Release every delayed transfer with `matured_time <= block time`.
///
/// Transfers are processed in `(matured_time, sequence)` order. A failed
/// release is logged and left in place; only store corruption fails the run.
pub fn end_blocker<S, B, P>(
    keeper: &mut Keeper<S, B, P>,
    ctx: &BlockContext,
) -> Result<EndBlockReport, Fatal>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    let mut report = EndBlockReport::default();
    if !keeper.config().is_active(ctx.height) {
        return Ok(report);
    }

    let now = ctx.unix_time();
    for sequence in keeper.matured_sequences(now)? {
        let transfer = keeper
            .get_delayed_transfer(sequence)?
            .ok_or(Fatal::MissingRecord(sequence))?;
        if !transfer.is_matured(now) {
            return Err(Fatal::IndexMismatch {
                sequence,
                detail: format!(
                    "maturity index is due at {} but the record matures at {}",
                    now, transfer.matured_time
                ),
            });
        }

        if let Err(err) =
            keeper
                .supply
                .send_coins_from_module_to_account(MODULE_NAME, &transfer.to, &transfer.amount)
        {
            log::error!(
                "Failed to release delayed transfer {} to {}: {}",
                sequence,
                transfer.to,
                err
            );
            report.deferred.push(sequence);
            continue;
        }

        keeper.delete_delayed_transfer(&transfer)?;

        report.released.push(sequence);
        report.events.push(AssetEvent::ReleaseDelayedTransfer {
            sequence,
            to: transfer.to,
            amount: transfer.amount,
        });
    }

    if !report.released.is_empty() || !report.deferred.is_empty() {
        log::info!(
            "Block {}: released {} delayed transfers, deferred {}",
            ctx.height,
            report.released.len(),
            report.deferred.len()
        );
    }
    Ok(report)
}
