//! NBBO tick record
//!
//! One consolidated quote update. Identity fields are optional because the
//! producer hands over rows as they appear in the source file and the
//! validator has to be able to count missing values; storage never rejects a
//! row for being incomplete.

use crate::errors::MalformedTimestamp;
use crate::ids::Symbol;
use crate::timestamp::{self, DecodedTime, PackedTime};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quote from the reporting exchange that triggered the NBBO update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeringQuote {
    pub bid_price: Option<Decimal>,
    pub bid_size: Option<u64>,
    pub offer_price: Option<Decimal>,
    pub offer_size: Option<u64>,
    pub quote_condition: Option<char>,
}

/// Consolidated best bid and offer after the update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedQuote {
    pub best_bid_price: Option<Decimal>,
    pub best_bid_size: Option<u64>,
    pub best_bid_exchange: Option<char>,
    pub best_bid_quote_condition: Option<char>,
    pub best_bid_finra_mm_id: Option<String>,

    pub best_offer_price: Option<Decimal>,
    pub best_offer_size: Option<u64>,
    pub best_offer_exchange: Option<char>,
    pub best_offer_quote_condition: Option<char>,
    pub best_offer_finra_mm_id: Option<String>,
}

/// Regulatory indicators and import bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatoryMeta {
    pub national_bbo_ind: Option<char>,
    pub finra_bbo_ind: Option<char>,
    pub luld_indicator: Option<char>,
    pub luld_nbbo_indicator: Option<char>,
    pub sip_message_id: Option<char>,
    pub security_status: Option<char>,

    // Same packed HHMMSSnnnnnnnnn layout as `NbboTick::time`
    pub participant_timestamp: Option<i64>,
    pub finra_adf_timestamp: Option<i64>,

    pub import_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Complete NBBO tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NbboTick {
    // Identity
    pub data_date: NaiveDate, // Trading session, assigned from the source file
    pub time: Option<i64>,    // Packed HHMMSSnnnnnnnnn, may be malformed
    pub exchange: Option<char>,
    pub symbol: Option<Symbol>,
    pub sequence_number: Option<u64>,

    pub quote: TriggeringQuote,
    pub nbbo: ConsolidatedQuote,
    pub meta: RegulatoryMeta,
}

impl NbboTick {
    /// Create a tick with identity fields only
    pub fn new(
        data_date: NaiveDate,
        time: Option<i64>,
        exchange: Option<char>,
        symbol: Option<Symbol>,
        sequence_number: Option<u64>,
    ) -> Self {
        Self {
            data_date,
            time,
            exchange,
            symbol,
            sequence_number,
            quote: TriggeringQuote::default(),
            nbbo: ConsolidatedQuote::default(),
            meta: RegulatoryMeta::default(),
        }
    }

    /// Set consolidated best bid/offer prices and sizes
    pub fn with_nbbo(
        mut self,
        best_bid_price: Decimal,
        best_bid_size: u64,
        best_offer_price: Decimal,
        best_offer_size: u64,
    ) -> Self {
        self.nbbo.best_bid_price = Some(best_bid_price);
        self.nbbo.best_bid_size = Some(best_bid_size);
        self.nbbo.best_offer_price = Some(best_offer_price);
        self.nbbo.best_offer_size = Some(best_offer_size);
        self
    }

    /// Set the exchanges currently setting each side of the NBBO
    pub fn with_best_exchanges(mut self, bid_exchange: char, offer_exchange: char) -> Self {
        self.nbbo.best_bid_exchange = Some(bid_exchange);
        self.nbbo.best_offer_exchange = Some(offer_exchange);
        self
    }

    /// Set the triggering exchange quote
    pub fn with_quote(mut self, quote: TriggeringQuote) -> Self {
        self.quote = quote;
        self
    }

    /// Decode the packed time
    pub fn decoded_time(&self) -> Result<DecodedTime, MalformedTimestamp> {
        timestamp::decode(self.time)
    }

    /// Packed time if present and valid
    pub fn packed_time(&self) -> Option<PackedTime> {
        self.time.and_then(|raw| PackedTime::new(raw).ok())
    }

    pub fn has_valid_time(&self) -> bool {
        self.packed_time().is_some()
    }

    /// True when any identity field the validator requires is missing
    pub fn missing_required_fields(&self) -> bool {
        self.time.is_none()
            || self.symbol.is_none()
            || self.exchange.is_none()
            || self.sequence_number.is_none()
    }

    /// Both best bid and best offer present and strictly positive
    pub fn is_priced(&self) -> bool {
        matches!(
            (self.nbbo.best_bid_price, self.nbbo.best_offer_price),
            (Some(bid), Some(offer)) if bid > Decimal::ZERO && offer > Decimal::ZERO
        )
    }

    /// Derived spread (best offer - best bid), priced ticks only
    pub fn spread(&self) -> Option<Decimal> {
        if !self.is_priced() {
            return None;
        }
        match (self.nbbo.best_bid_price, self.nbbo.best_offer_price) {
            (Some(bid), Some(offer)) => Some(offer - bid),
            _ => None,
        }
    }

    /// Tie-break ordering key: packed time, then sequence number
    pub fn order_key(&self) -> (Option<i64>, Option<u64>) {
        (self.time, self.sequence_number)
    }
}
