//! Card records as supplied by the data source
//!
//! The external source hands over flat records (effect type + amount +
//! optional secondary amount per position); validation turns them into the
//! crate's card variants. Records that don't fit their declared kind are
//! rejected rather than patched up.

use crate::core::{
    AdjacentDirection, Card, CardLevel, ChargeKind, ChargeSide, EffectKind, SectorId,
};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Effect tags as they appear in card data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTypeRecord {
    AddCredits,
    AddIncome,
    AddVictoryPoints,
    AddCreditsAndIncome,
    AddCreditsAndVictoryPoints,
    AdjacentSectorRewardLeft,
    AdjacentSectorRewardRight,
    ClaimCardsAtLevel,
    AddChargeCube,
    AddToRoll,
}

/// One effect as recorded: a tag, an amount, and an optional secondary
/// amount used only by the compound tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub effect_type: EffectTypeRecord,
    pub amount: i32,
    #[serde(default)]
    pub secondary_amount: i32,
}

impl EffectRecord {
    fn small_amount(&self, what: &str) -> Result<u8> {
        u8::try_from(self.amount).map_err(|_| {
            GameError::InvalidCard(format!("{what} amount {} out of range", self.amount))
        })
    }

    fn non_negative(&self) -> Result<()> {
        if self.amount < 0 || self.secondary_amount < 0 {
            return Err(GameError::InvalidCard(format!(
                "negative amount in {:?} record",
                self.effect_type
            )));
        }
        Ok(())
    }

    /// Map the (tag, amount, secondary amount) triple onto the closed effect
    /// union. Additive amounts are rejected here if negative, so activation
    /// can never trip the resolver's guard on well-formed data.
    pub fn to_effect(&self) -> Result<EffectKind> {
        self.non_negative()?;
        Ok(match self.effect_type {
            EffectTypeRecord::AddCredits => EffectKind::AddCredits {
                amount: self.amount,
            },
            EffectTypeRecord::AddIncome => EffectKind::AddIncome {
                amount: self.amount,
            },
            EffectTypeRecord::AddVictoryPoints => EffectKind::AddVictoryPoints {
                amount: self.amount,
            },
            EffectTypeRecord::AddCreditsAndIncome => EffectKind::AddCreditsAndIncome {
                credits: self.amount,
                income: self.secondary_amount,
            },
            EffectTypeRecord::AddCreditsAndVictoryPoints => {
                EffectKind::AddCreditsAndVictoryPoints {
                    credits: self.amount,
                    points: self.secondary_amount,
                }
            }
            EffectTypeRecord::AdjacentSectorRewardLeft => EffectKind::AdjacentSectorReward {
                direction: AdjacentDirection::Left,
            },
            EffectTypeRecord::AdjacentSectorRewardRight => EffectKind::AdjacentSectorReward {
                direction: AdjacentDirection::Right,
            },
            EffectTypeRecord::ClaimCardsAtLevel => {
                let level = self.small_amount("claim level")?;
                if !(1..=3).contains(&level) {
                    return Err(GameError::InvalidCard(format!(
                        "claim level {level} out of range"
                    )));
                }
                EffectKind::ClaimCardsAtLevel { level }
            }
            EffectTypeRecord::AddChargeCube => EffectKind::AddChargeCube {
                amount: self.small_amount("charge cube")?,
            },
            EffectTypeRecord::AddToRoll => EffectKind::AddToRoll {
                amount: self.small_amount("roll boost")?,
            },
        })
    }
}

/// Charge kinds as recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKindRecord {
    Turn,
    OpponentTurn,
    Anytime,
}

impl ChargeKindRecord {
    fn to_kind(self) -> ChargeKind {
        match self {
            ChargeKindRecord::Turn => ChargeKind::Turn,
            ChargeKindRecord::OpponentTurn => ChargeKind::OpponentTurn,
            ChargeKindRecord::Anytime => ChargeKind::Anytime,
        }
    }
}

/// Charge behavior for one position of a charge card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRecord {
    pub effect: EffectRecord,
    pub required_cubes: u8,
    pub cube_limit: u8,
    pub kind: ChargeKindRecord,
}

impl ChargeRecord {
    fn to_side(&self) -> Result<ChargeSide> {
        ChargeSide::new(
            self.effect.to_effect()?,
            self.required_cubes,
            self.cube_limit,
            self.kind.to_kind(),
        )
    }
}

/// Which card variant a record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKindRecord {
    Standard,
    Charge,
    Colony,
}

/// One card as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub level: u8,
    pub sector: u8,
    pub cost: u32,
    pub kind: CardKindRecord,
    #[serde(default)]
    pub stationed: Option<EffectRecord>,
    #[serde(default)]
    pub deployed: Option<EffectRecord>,
    #[serde(default)]
    pub stationed_charge: Option<ChargeRecord>,
    #[serde(default)]
    pub deployed_charge: Option<ChargeRecord>,
}

impl CardRecord {
    fn require<'a, T>(&self, field: &'a Option<T>, what: &str) -> Result<&'a T> {
        field.as_ref().ok_or_else(|| {
            GameError::InvalidCard(format!("{}: {} card missing {what}", self.name, self.kind_name()))
        })
    }

    fn kind_name(&self) -> &'static str {
        match self.kind {
            CardKindRecord::Standard => "standard",
            CardKindRecord::Charge => "charge",
            CardKindRecord::Colony => "colony",
        }
    }

    /// Validate the record and build the card it describes.
    pub fn to_card(&self) -> Result<Card> {
        let sector = SectorId::new(self.sector)?;
        let level = CardLevel::from_number(self.level)?;
        match self.kind {
            CardKindRecord::Standard => {
                let stationed = self.require(&self.stationed, "stationed effect")?.to_effect()?;
                let deployed = self.require(&self.deployed, "deployed effect")?.to_effect()?;
                Card::standard(self.name.clone(), sector, level, self.cost, stationed, deployed)
            }
            CardKindRecord::Charge => {
                let stationed = self.require(&self.stationed, "stationed effect")?.to_effect()?;
                let deployed = self.require(&self.deployed, "deployed effect")?.to_effect()?;
                let stationed_charge =
                    self.require(&self.stationed_charge, "stationed charge side")?.to_side()?;
                let deployed_charge =
                    self.require(&self.deployed_charge, "deployed charge side")?.to_side()?;
                Card::charge(
                    self.name.clone(),
                    sector,
                    level,
                    self.cost,
                    stationed,
                    deployed,
                    stationed_charge,
                    deployed_charge,
                )
            }
            CardKindRecord::Colony => {
                if self.stationed.is_some() || self.deployed.is_some() {
                    return Err(GameError::InvalidCard(format!(
                        "{}: colony cards carry no effects",
                        self.name
                    )));
                }
                Card::colony(self.name.clone(), sector, level, self.cost)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credits_record(amount: i32) -> EffectRecord {
        EffectRecord {
            effect_type: EffectTypeRecord::AddCredits,
            amount,
            secondary_amount: 0,
        }
    }

    #[test]
    fn test_standard_record_round_trip() {
        let record = CardRecord {
            name: "Ore Refinery".to_string(),
            level: 1,
            sector: 4,
            cost: 3,
            kind: CardKindRecord::Standard,
            stationed: Some(credits_record(2)),
            deployed: Some(credits_record(1)),
            stationed_charge: None,
            deployed_charge: None,
        };
        let card = record.to_card().unwrap();
        assert_eq!(card.name(), "Ore Refinery");
        assert_eq!(card.sector().as_u8(), 4);
        assert_eq!(card.cost(), 3);
    }

    #[test]
    fn test_missing_effect_rejected() {
        let record = CardRecord {
            name: "Broken".to_string(),
            level: 1,
            sector: 4,
            cost: 3,
            kind: CardKindRecord::Standard,
            stationed: Some(credits_record(2)),
            deployed: None,
            stationed_charge: None,
            deployed_charge: None,
        };
        assert!(record.to_card().is_err());
    }

    #[test]
    fn test_colony_with_effects_rejected() {
        let record = CardRecord {
            name: "Overloaded Colony".to_string(),
            level: 3,
            sector: 2,
            cost: 12,
            kind: CardKindRecord::Colony,
            stationed: Some(credits_record(1)),
            deployed: None,
            stationed_charge: None,
            deployed_charge: None,
        };
        assert!(record.to_card().is_err());
    }

    #[test]
    fn test_charge_invariant_surfaces_from_record() {
        let bad_charge = ChargeRecord {
            effect: credits_record(5),
            required_cubes: 4,
            cube_limit: 2,
            kind: ChargeKindRecord::Anytime,
        };
        let record = CardRecord {
            name: "Misbuilt Reactor".to_string(),
            level: 2,
            sector: 9,
            cost: 8,
            kind: CardKindRecord::Charge,
            stationed: Some(credits_record(1)),
            deployed: Some(credits_record(1)),
            stationed_charge: Some(bad_charge.clone()),
            deployed_charge: Some(bad_charge),
        };
        assert!(record.to_card().is_err());
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "name": "Scrap Hauler",
            "level": 1,
            "sector": 6,
            "cost": 2,
            "kind": "standard",
            "stationed": { "effect_type": "add_credits", "amount": 2 },
            "deployed": { "effect_type": "add_credits_and_income", "amount": 1, "secondary_amount": 1 }
        }"#;
        let record: CardRecord = serde_json::from_str(json).unwrap();
        let card = record.to_card().unwrap();
        assert_eq!(
            card.effect(crate::core::CardPosition::Deployed),
            Some(&EffectKind::AddCreditsAndIncome {
                credits: 1,
                income: 1
            })
        );
    }
}
