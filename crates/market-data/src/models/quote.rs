/// The four quote fields scraped for one symbol.
///
/// The group is always read and replaced as a whole so that a price is never
/// paired with a previous close from a different refresh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteFields {
    /// Human-readable instrument name (Yahoo `shortName`)
    pub display_name: String,

    /// Exchange session label such as `REGULAR`, `PRE` or `CLOSED`
    pub market_state: String,

    /// Current regular-market price
    pub price: f64,

    /// Previous session's closing price
    pub previous_close: f64,
}

impl QuoteFields {
    /// Absolute change since the previous close.
    pub fn change(&self) -> f64 {
        self.price - self.previous_close
    }

    /// Percentage change since the previous close.
    ///
    /// Returns `None` when there is no previous close to divide by, which is
    /// also the state of a record that has never been refreshed.
    pub fn change_percent(&self) -> Option<f64> {
        if self.previous_close == 0.0 {
            return None;
        }
        Some(self.price / self.previous_close * 100.0 - 100.0)
    }

    /// Whether the price is strictly above the previous close.
    pub fn is_gain(&self) -> bool {
        self.price > self.previous_close
    }
}
