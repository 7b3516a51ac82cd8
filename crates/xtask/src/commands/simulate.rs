//! Simulate a factory-built condition against an in-memory creature
//!
//! Builds a condition from a template, attaches it to a `MemoryCreature`,
//! ticks it until it expires, and prints what happened on every tick.
//! The condition can optionally be saved as a condition file for `inspect`.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use strum::IntoEnumIterator;

use game_conditions::{
    Condition, ConditionEnd, ConditionFlags, ConditionId, CreatureId, Effect, MemoryCreature,
    PropWriteStream, create_condition, create_period_average_damage_condition,
    create_period_damage_condition,
};

use crate::dirs;

/// Upper bound on simulated ticks for persistent conditions.
const MAX_STEPS: u32 = 1_000;

/// Simulate a condition template
#[derive(Parser)]
pub struct Simulate {
    /// Condition template (e.g., poison, fire, haste). Use --list to see all
    #[arg(value_name = "ID", required_unless_present = "list")]
    id: Option<ConditionId>,

    /// List all condition templates and exit
    #[arg(long)]
    list: bool,

    /// Ticks between periodic rounds
    #[arg(short, long, default_value_t = 1000)]
    interval: u32,

    /// Fixed damage per round
    #[arg(long, conflicts_with = "total")]
    damage: Option<i32>,

    /// Number of rounds for fixed damage
    #[arg(long, default_value_t = 4)]
    rounds: u32,

    /// Total damage for a tapering condition (requires --start)
    #[arg(long, requires = "start")]
    total: Option<i32>,

    /// First-round damage for a tapering condition
    #[arg(long)]
    start: Option<i32>,

    /// Speed modifier in percent of base speed
    #[arg(long, allow_hyphen_values = true)]
    speed_percent: Option<i32>,

    /// Duration in ticks for templates without damage
    #[arg(long, default_value_t = 5000)]
    ticks: u32,

    /// Never expire (sets the PERSISTENT flag)
    #[arg(long)]
    persistent: bool,

    /// Ticks advanced per simulation step
    #[arg(long, default_value_t = 1000)]
    step: u32,

    /// Creature max health
    #[arg(long, default_value_t = 1000)]
    health: i32,

    /// Save the built condition under this name in the data directory
    #[arg(long, value_name = "NAME")]
    save: Option<String>,

    /// Custom data directory (defaults to $CONDITION_DATA_DIR or platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        if self.list {
            print_templates();
            return Ok(());
        }
        let id = self
            .id
            .context("A condition template is required unless --list is given")?;

        let condition = self.build(id);

        if let Some(ref name) = self.save {
            let mut out = PropWriteStream::new();
            condition
                .serialize(&mut out)
                .context("Failed to serialize condition")?;
            let path = dirs::save_condition_file(name, self.data_dir.as_deref(), out.as_bytes())?;
            println!(
                "{} {}",
                style("Saved:").bold().cyan(),
                path.display()
            );
        }

        self.run(condition)
    }

    fn build(&self, id: ConditionId) -> Condition {
        let mut condition = match (self.damage, self.total, self.start) {
            (Some(damage), _, _) => {
                create_period_damage_condition(id, self.interval, damage, self.rounds)
            }
            (None, Some(total), Some(start)) => {
                create_period_average_damage_condition(id, self.interval, start, total)
            }
            _ => create_condition(id, self.ticks, 0, ConditionFlags::empty()),
        };

        if let Some(percent) = self.speed_percent {
            condition.add_effect(Effect::mod_speed(percent, 0));
        }
        if self.persistent {
            condition.set_flags(condition.flags() | ConditionFlags::PERSISTENT);
        }
        condition
    }

    fn run(&self, mut condition: Condition) -> Result<()> {
        let mut creature = MemoryCreature::new(CreatureId(1)).with_health(self.health);

        println!(
            "{}",
            style(format!("=== Simulating {} ===", condition.name()))
                .bold()
                .green()
        );
        println!("  Ticks: {}  Step: {}", condition.ticks(), self.step);
        println!("  Effects: {}", condition.effects().len());
        println!();

        if !condition.on_begin(&mut creature) {
            anyhow::bail!("Condition was rejected by the creature");
        }
        println!(
            "  begin  speed {:>4}  health {:>5}",
            creature.speed, creature.health
        );

        let mut step = 0u32;
        loop {
            step += 1;
            let before = creature.total_damage() - creature.total_healing();
            let alive = condition.on_tick(&mut creature, self.step);
            let delta = creature.total_damage() - creature.total_healing() - before;

            println!(
                "  {:>5}  damage {:>5}  health {:>5}  remaining {:>6}",
                step,
                delta,
                creature.health,
                condition.ticks()
            );

            if !alive {
                break;
            }
            if step >= MAX_STEPS {
                println!("{}", style("  (step limit reached)").dim());
                break;
            }
        }

        condition.on_end(&mut creature, ConditionEnd::Expired);
        println!(
            "  end    speed {:>4}  health {:>5}",
            creature.speed, creature.health
        );
        println!();

        println!("{}", style("Totals:").bold().yellow());
        println!("  Damage: {}", creature.total_damage());
        println!("  Healing: {}", creature.total_healing());
        println!("  Combat changes: {}", creature.combat_log.len());

        Ok(())
    }
}

fn print_templates() {
    println!("{}", style("Condition templates:").bold().yellow());
    for id in ConditionId::iter() {
        println!(
            "  {:<14} {:<20} combat {:<10} mechanic {:<10} flags {:?}",
            id.as_ref(),
            id.condition_name(),
            id.combat_type(),
            id.mechanic_type(),
            id.default_flags()
        );
    }
}
