//! Interactive controller for human players
//!
//! Reads choices from stdin and displays the relevant slice of game state.
//! Invalid input re-prompts locally; the engine re-requests anything that
//! fails its own validation on top of that.

use crate::core::{CardLevel, CardPosition, DiceRoll, PlayerId};
use crate::game::controller::{BuyDecision, GameStateView, PlayerController};
use crate::Result;
use std::io::{self, Write};

pub struct InteractiveController {
    player_id: PlayerId,
}

impl InteractiveController {
    pub fn new(player_id: PlayerId) -> Self {
        InteractiveController { player_id }
    }

    fn read_line(&self) -> Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn show_sector_options(&self, view: &GameStateView<'_>, roll: DiceRoll) {
        println!("\nDice: {roll}  (options: {}, {}, {})", roll.d1, roll.d2, roll.sum());
        for option in [roll.d1, roll.d2, roll.sum()] {
            let Ok(sector) = crate::core::SectorId::new(option) else {
                continue;
            };
            let stationed = view
                .stationed_card(sector)
                .map(|c| {
                    let effect = c
                        .effect(CardPosition::Stationed)
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "no effect".to_string());
                    format!("{} ({effect})", c.name())
                })
                .unwrap_or_else(|| "(empty)".to_string());
            let deployed = view.deployed_cards(sector).len();
            println!("  {option:>2}: {stationed}, {deployed} deployed");
        }
    }

    fn show_market(&self, view: &GameStateView<'_>) {
        println!("\nCredits: {}", view.credits());
        for level in [CardLevel::Level1, CardLevel::Level2, CardLevel::Level3] {
            print!("  {level}: ");
            for (slot, visible) in view.visible_row(level).iter().enumerate() {
                match visible.card() {
                    Some(card) => print!("[{slot}] {} ({}c)  ", card.name(), card.cost()),
                    None => print!("[{slot}] --  "),
                }
            }
            println!();
        }
    }

    fn display_help(&self) {
        println!("\n=== Help ===");
        println!("Sector choice: enter one of the three numbers shown");
        println!("Buy phase: enter '<level> <slot>' (e.g. '2 0'), or 'p' to pass");
        println!("  ?  - Show this help menu");
        println!("  s  - Show scoreboard");
        println!();
    }

    fn show_scoreboard(&self, view: &GameStateView<'_>) {
        println!("\n=== Scoreboard (threshold {}) ===", view.victory_threshold());
        for (id, points) in view.scoreboard() {
            println!("  {id}: {points} VP");
        }
        println!();
    }
}

impl PlayerController for InteractiveController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_sector(&mut self, view: &GameStateView<'_>, roll: DiceRoll) -> Result<u8> {
        self.show_sector_options(view, roll);
        loop {
            print!("{}: choose a sector> ", self.player_id);
            io::stdout().flush()?;
            let input = self.read_line()?;
            match input.as_str() {
                "?" => self.display_help(),
                "s" => self.show_scoreboard(view),
                _ => match input.parse::<u8>() {
                    Ok(sector) => return Ok(sector),
                    Err(_) => println!("Enter {}, {}, or {}.", roll.d1, roll.d2, roll.sum()),
                },
            }
        }
    }

    fn choose_purchase(&mut self, view: &GameStateView<'_>) -> Result<BuyDecision> {
        self.show_market(view);
        loop {
            print!("{}: buy '<level> <slot>' or 'p' to pass> ", self.player_id);
            io::stdout().flush()?;
            let input = self.read_line()?;
            match input.as_str() {
                "p" | "pass" | "" => return Ok(BuyDecision::Decline),
                "?" => self.display_help(),
                "s" => self.show_scoreboard(view),
                _ => {
                    let mut parts = input.split_whitespace();
                    let parsed = (
                        parts.next().and_then(|s| s.parse::<u8>().ok()),
                        parts.next().and_then(|s| s.parse::<usize>().ok()),
                    );
                    if let (Some(level_num), Some(slot)) = parsed {
                        if let Ok(level) = CardLevel::from_number(level_num) {
                            return Ok(BuyDecision::Purchase { level, slot });
                        }
                    }
                    println!("Couldn't parse that. '?' for help.");
                }
            }
        }
    }

    fn on_game_end(&mut self, view: &GameStateView<'_>, winners: &[PlayerId]) {
        self.show_scoreboard(view);
        let names: Vec<_> = winners.iter().map(|w| w.to_string()).collect();
        println!("Winners: {}", names.join(", "));
    }
}
