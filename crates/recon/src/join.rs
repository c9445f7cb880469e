use std::collections::BTreeMap;

use listino_engine::PriceRow;

use crate::error::ReconError;
use crate::model::{PriceKey, ReconRow};

#[derive(Debug)]
pub struct JoinOutput {
    /// One row per client row, in client order.
    pub rows: Vec<ReconRow>,
    /// Client rows with no partner-side match.
    pub unmatched: usize,
}

/// Left join of client rows onto partner rows on (block, distance, item_id).
///
/// Every client row appears exactly once; partner fields are absent on no
/// match. Duplicate partner keys make the join ambiguous and fail distinctly.
pub fn join_tables(client: &[PriceRow], partner: &[PriceRow]) -> Result<JoinOutput, ReconError> {
    let partner_index = index_partner(partner)?;

    let mut rows = Vec::with_capacity(client.len());
    let mut unmatched = 0usize;

    for c in client {
        let key = PriceKey {
            block: c.block.clone(),
            distance: c.distance.clone(),
            item_id: c.item_id.clone(),
        };
        let partner_price = partner_index.get(&key).copied();
        if partner_price.is_none() {
            unmatched += 1;
        }
        rows.push(ReconRow {
            block: c.block.clone(),
            distance: c.distance.clone(),
            item_id: c.item_id.clone(),
            item_desc: c.item_desc.clone(),
            full_activity: c.full_activity.clone(),
            client_price: c.price,
            partner_price,
            partner_price_effective: partner_price,
        });
    }

    Ok(JoinOutput { rows, unmatched })
}

fn index_partner(partner: &[PriceRow]) -> Result<BTreeMap<PriceKey, f64>, ReconError> {
    let mut index = BTreeMap::new();
    for p in partner {
        let key = PriceKey {
            block: p.block.clone(),
            distance: p.distance.clone(),
            item_id: p.item_id.clone(),
        };
        if index.insert(key, p.price).is_some() {
            return Err(ReconError::DuplicatePartnerKey {
                block: p.block.clone(),
                distance: p.distance.clone(),
                item_id: p.item_id.clone(),
            });
        }
    }
    Ok(index)
}
