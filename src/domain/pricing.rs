/// Token counts reported by the inference endpoint for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
}

impl TokenUsage {
    pub fn new(input: u64, output: u64) -> Self {
        Self { input, output }
    }
}

/// Per-million-token USD prices and the fixed conversion rate into credits.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    pub usd_per_million_input: f64,
    pub usd_per_million_output: f64,
    pub credits_per_usd: f64,
}

impl Pricing {
    /// Credit cost of one call, rounded to 5 fractional digits.
    ///
    /// Zero tokens cost zero; there is no minimum charge.
    pub fn cost(&self, usage: TokenUsage) -> f64 {
        let usd = usage.input as f64 / 1e6 * self.usd_per_million_input
            + usage.output as f64 / 1e6 * self.usd_per_million_output;
        round5(usd * self.credits_per_usd)
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            usd_per_million_input: 0.075,
            usd_per_million_output: 0.30,
            credits_per_usd: 24.0,
        }
    }
}

/// Round to 5 fractional digits, half away from zero.
pub fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}
