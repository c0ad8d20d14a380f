//! Domain models consumed as eligibility/configuration input

pub mod discount;
pub mod instrument;
pub mod merchant;

pub use discount::{Discount, DiscountKind};
pub use instrument::{InstrumentKind, PaymentInstrument};
pub use merchant::{Frequency, MerchantConfig, Tier};
