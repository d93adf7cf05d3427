//! Built-in card set
//!
//! A complete default supply so the binary and the integration tests run
//! without an external card file. Laid out like any other data source: the
//! twelve starting cards first, then the three levels.

use crate::loader::card::{
    CardKindRecord, CardRecord, ChargeKindRecord, ChargeRecord, EffectRecord, EffectTypeRecord,
};

fn effect(effect_type: EffectTypeRecord, amount: i32) -> EffectRecord {
    EffectRecord {
        effect_type,
        amount,
        secondary_amount: 0,
    }
}

fn effect2(effect_type: EffectTypeRecord, amount: i32, secondary_amount: i32) -> EffectRecord {
    EffectRecord {
        effect_type,
        amount,
        secondary_amount,
    }
}

fn standard(
    name: &str,
    level: u8,
    sector: u8,
    cost: u32,
    stationed: EffectRecord,
    deployed: EffectRecord,
) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        level,
        sector,
        cost,
        kind: CardKindRecord::Standard,
        stationed: Some(stationed),
        deployed: Some(deployed),
        stationed_charge: None,
        deployed_charge: None,
    }
}

fn charge_side(
    effect: EffectRecord,
    required_cubes: u8,
    cube_limit: u8,
    kind: ChargeKindRecord,
) -> ChargeRecord {
    ChargeRecord {
        effect,
        required_cubes,
        cube_limit,
        kind,
    }
}

#[allow(clippy::too_many_arguments)]
fn charge(
    name: &str,
    level: u8,
    sector: u8,
    cost: u32,
    stationed: EffectRecord,
    deployed: EffectRecord,
    stationed_charge: ChargeRecord,
    deployed_charge: ChargeRecord,
) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        level,
        sector,
        cost,
        kind: CardKindRecord::Charge,
        stationed: Some(stationed),
        deployed: Some(deployed),
        stationed_charge: Some(stationed_charge),
        deployed_charge: Some(deployed_charge),
    }
}

fn colony(name: &str, sector: u8, cost: u32) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        level: 3,
        sector,
        cost,
        kind: CardKindRecord::Colony,
        stationed: None,
        deployed: None,
        stationed_charge: None,
        deployed_charge: None,
    }
}

/// The default card list, in data-source order.
pub fn builtin_records() -> Vec<CardRecord> {
    use EffectTypeRecord::*;

    let mut records = Vec::new();

    // Starting cards: one free card per sector. Low sectors pay single
    // credits, the high rolls pay a little more.
    let starting = [
        ("Shuttle Pod", 1, 1),
        ("Cargo Sled", 2, 1),
        ("Salvage Skiff", 3, 1),
        ("Ore Scow", 4, 1),
        ("Relay Drone", 5, 1),
        ("Tug Boat", 6, 1),
        ("Survey Probe", 7, 2),
        ("Patrol Cutter", 8, 2),
        ("Mining Barge", 9, 2),
        ("Fuel Tanker", 10, 2),
        ("Escort Frigate", 11, 2),
        ("Deep Hauler", 12, 2),
    ];
    for (name, sector, pay) in starting {
        records.push(standard(
            name,
            0,
            sector,
            0,
            effect(AddCredits, pay),
            effect(AddCredits, 1),
        ));
    }

    // Level 1: cheap economy, first charge cards, one roll booster.
    records.push(standard(
        "Hydroponics Bay",
        1,
        1,
        2,
        effect(AddCredits, 2),
        effect(AddCredits, 1),
    ));
    records.push(standard(
        "Scrap Exchange",
        1,
        2,
        3,
        effect(AddCredits, 3),
        effect(AddCredits, 1),
    ));
    records.push(standard(
        "Dock Extension",
        1,
        3,
        3,
        effect2(AddCreditsAndIncome, 1, 1),
        effect(AddIncome, 1),
    ));
    records.push(standard(
        "Customs Office",
        1,
        4,
        4,
        effect(AddIncome, 2),
        effect(AddIncome, 1),
    ));
    records.push(standard(
        "Beacon Array",
        1,
        5,
        2,
        effect(AddCredits, 2),
        effect(AddVictoryPoints, 1),
    ));
    records.push(charge(
        "Capacitor Bank",
        1,
        6,
        4,
        effect(AddChargeCube, 1),
        effect(AddChargeCube, 1),
        charge_side(effect(AddCredits, 4), 2, 3, ChargeKindRecord::Turn),
        charge_side(effect(AddCredits, 2), 2, 3, ChargeKindRecord::Anytime),
    ));
    records.push(standard(
        "Signal Booster",
        1,
        7,
        5,
        effect(AddToRoll, 1),
        effect(AddCredits, 1),
    ));
    records.push(standard(
        "Freight Terminal",
        1,
        8,
        4,
        effect2(AddCreditsAndIncome, 2, 1),
        effect(AddCredits, 1),
    ));
    records.push(standard(
        "Recycling Plant",
        1,
        9,
        3,
        effect(AddCredits, 3),
        effect(AddIncome, 1),
    ));
    records.push(charge(
        "Ion Collector",
        1,
        10,
        5,
        effect(AddChargeCube, 1),
        effect(AddChargeCube, 1),
        charge_side(effect(AddVictoryPoints, 2), 3, 4, ChargeKindRecord::Turn),
        charge_side(effect(AddCredits, 3), 3, 4, ChargeKindRecord::OpponentTurn),
    ));
    records.push(standard(
        "Arc Welder Guild",
        1,
        11,
        4,
        effect(AddVictoryPoints, 1),
        effect(AddCredits, 2),
    ));
    records.push(standard(
        "Night Market",
        1,
        12,
        5,
        effect2(AddCreditsAndVictoryPoints, 2, 1),
        effect(AddCredits, 2),
    ));
    records.push(standard(
        "Relay Uplink",
        1,
        5,
        3,
        effect(AdjacentSectorRewardRight, 0),
        effect(AddCredits, 1),
    ));
    records.push(standard(
        "Courier Wing",
        1,
        2,
        2,
        effect(AddCredits, 1),
        effect2(AddCreditsAndIncome, 1, 1),
    ));

    // Level 2: income engines and the first real point cards.
    records.push(standard(
        "Orbital Foundry",
        2,
        1,
        7,
        effect(AddIncome, 3),
        effect(AddIncome, 1),
    ));
    records.push(standard(
        "Trade Consortium",
        2,
        2,
        8,
        effect2(AddCreditsAndIncome, 3, 2),
        effect(AddCredits, 2),
    ));
    records.push(standard(
        "Observatory Ring",
        2,
        3,
        8,
        effect(AddVictoryPoints, 3),
        effect(AddVictoryPoints, 1),
    ));
    records.push(charge(
        "Fusion Cell Array",
        2,
        4,
        9,
        effect(AddChargeCube, 2),
        effect(AddChargeCube, 1),
        charge_side(effect(AddVictoryPoints, 4), 3, 5, ChargeKindRecord::Turn),
        charge_side(effect(AddCredits, 4), 3, 5, ChargeKindRecord::Anytime),
    ));
    records.push(standard(
        "Habitat Spur",
        2,
        5,
        7,
        effect2(AddCreditsAndVictoryPoints, 3, 2),
        effect(AddVictoryPoints, 1),
    ));
    records.push(standard(
        "Docking Ring",
        2,
        6,
        8,
        effect(AddIncome, 4),
        effect(AddCredits, 2),
    ));
    records.push(standard(
        "Gravity Forge",
        2,
        7,
        9,
        effect(AddVictoryPoints, 4),
        effect(AddCredits, 2),
    ));
    records.push(standard(
        "Salvage Yard",
        2,
        8,
        7,
        effect(AddCredits, 6),
        effect(AddCredits, 2),
    ));
    records.push(standard(
        "Claim Registry",
        2,
        9,
        8,
        effect(ClaimCardsAtLevel, 1),
        effect(AddCredits, 2),
    ));
    records.push(standard(
        "Survey Flotilla",
        2,
        10,
        8,
        effect2(AddCreditsAndIncome, 4, 2),
        effect(AddIncome, 1),
    ));
    records.push(charge(
        "Deflector Hub",
        2,
        11,
        9,
        effect(AddChargeCube, 2),
        effect(AddChargeCube, 1),
        charge_side(effect(AddToRoll, 1), 2, 4, ChargeKindRecord::Turn),
        charge_side(effect(AddVictoryPoints, 2), 2, 4, ChargeKindRecord::OpponentTurn),
    ));
    records.push(standard(
        "Gem Exchange",
        2,
        12,
        9,
        effect2(AddCreditsAndVictoryPoints, 4, 3),
        effect(AddVictoryPoints, 1),
    ));

    // Level 3: the closers.
    records.push(standard(
        "Terraforming Array",
        3,
        1,
        12,
        effect(AddVictoryPoints, 6),
        effect(AddVictoryPoints, 2),
    ));
    records.push(standard(
        "Gate Nexus",
        3,
        3,
        13,
        effect2(AddCreditsAndVictoryPoints, 5, 5),
        effect(AddVictoryPoints, 2),
    ));
    records.push(standard(
        "Shipyard Prime",
        3,
        5,
        14,
        effect(AddIncome, 7),
        effect(AddIncome, 2),
    ));
    records.push(charge(
        "Singularity Core",
        3,
        7,
        14,
        effect(AddChargeCube, 2),
        effect(AddChargeCube, 2),
        charge_side(effect(AddVictoryPoints, 8), 4, 6, ChargeKindRecord::Turn),
        charge_side(effect(AddVictoryPoints, 3), 4, 6, ChargeKindRecord::Anytime),
    ));
    records.push(standard(
        "Grand Bazaar",
        3,
        9,
        12,
        effect(AddCredits, 10),
        effect(AddCredits, 3),
    ));
    records.push(standard(
        "Fleet Academy",
        3,
        11,
        13,
        effect(AddVictoryPoints, 7),
        effect(AddCredits, 3),
    ));
    records.push(standard(
        "Embassy Spire",
        3,
        12,
        12,
        effect2(AddCreditsAndVictoryPoints, 4, 6),
        effect(AddVictoryPoints, 2),
    ));
    records.push(colony("Colony: New Meridian", 2, 12));
    records.push(colony("Colony: Kepler's Rest", 6, 13));
    records.push(colony("Colony: Far Harbor", 10, 14));

    records
}
