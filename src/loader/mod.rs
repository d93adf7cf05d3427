//! Card data loading and game bootstrapping

pub mod builtin;
pub mod card;
pub mod game_init;
pub mod source;

pub use card::{CardKindRecord, CardRecord, ChargeKindRecord, ChargeRecord, EffectRecord, EffectTypeRecord};
pub use game_init::GameInitializer;
pub use source::CardSource;
