use crate::domain::money::Currency;
use crate::domain::pricing::PriceCatalog;
use crate::error::Result;
use std::io::Write;

/// Writes the price list as `item,name,amount,currency` rows.
pub fn write_price_list<W: Write>(sink: W, catalog: &PriceCatalog) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    let currency = Currency::Ngn.code();

    writer.write_record(["item", "name", "amount", "currency"])?;
    let deposit = catalog.deposit().to_string();
    writer.write_record(["deposit", "Reservation deposit", deposit.as_str(), currency])?;
    for price in catalog.tiers() {
        let amount = price.amount.to_string();
        writer.write_record([price.tier.as_str(), price.name, amount.as_str(), currency])?;
    }
    writer.flush()?;
    Ok(())
}
