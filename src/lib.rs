//! Pinpoint library exports

use clap::ValueEnum;

pub mod core;
pub mod geo;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Location provider selection (CLI flag, mirrored in config as a string).
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Locator {
    /// Coarse position of the machine's public IP
    #[default]
    Ip,
    /// No provider — always falls back to the fixed coordinate
    None,
}

impl Locator {
    pub fn as_str(self) -> &'static str {
        match self {
            Locator::Ip => "ip",
            Locator::None => "none",
        }
    }
}
