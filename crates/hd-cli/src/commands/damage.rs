use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use hd_damage::{
    ActorContext, DamageCalculator, DicePartsBundle, ItemDescriptor, ResolutionOptions,
    RulesConfig, normalize_conditional_attacks,
};
use hd_dice::{HitLocationName, RollTooltip, dice_parts_to_fully_qualified_effect_formula};
use serde::{Deserialize, Serialize};

/// An attack to resolve, as read from a scenario file.
#[derive(Debug, Deserialize)]
struct Scenario {
    item: ItemDescriptor,
    #[serde(default)]
    context: ActorContext,
    #[serde(default)]
    options: ResolutionOptions,
}

#[derive(Serialize)]
struct DamageReport<'a> {
    formula: String,
    bundle: &'a DicePartsBundle,
    roll: Option<RollTooltip>,
}

pub struct DamageArgs<'a> {
    pub scenario: &'a Path,
    pub rules: Option<&'a Path>,
    pub roll: bool,
    pub seed: Option<u64>,
    pub called: Option<&'a str>,
    pub json: bool,
}

fn load_scenario(path: &Path) -> Result<Scenario, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid scenario {}: {e}", path.display()))
}

pub async fn run(args: &DamageArgs<'_>) -> Result<(), String> {
    let mut scenario = load_scenario(args.scenario)?;
    let config = match args.rules {
        Some(path) => RulesConfig::from_path(path).map_err(|e| e.to_string())?,
        None => RulesConfig::default(),
    };
    let called = args
        .called
        .map(|name| {
            HitLocationName::from_name(name).ok_or_else(|| format!("unknown hit location '{name}'"))
        })
        .transpose()?;

    normalize_conditional_attacks(&mut scenario.context);

    let calc = DamageCalculator::new(config);
    let bundle = calc
        .try_calculate(&scenario.item, &scenario.context, &scenario.options)
        .map_err(|e| e.to_string())?;

    let killing = scenario.item.effect.killing
        || bundle
            .base_attack_item
            .as_ref()
            .is_some_and(|base| base.effect.killing);
    let formula = dice_parts_to_fully_qualified_effect_formula(&bundle.dice_parts, killing);

    let roller = if args.roll {
        let mut roller = calc.roller_for_bundle(&scenario.item, &bundle, called);
        let mut source = super::die_source(args.seed);
        roller
            .roll(&mut source)
            .await
            .map_err(|e| e.to_string())?;
        Some(roller)
    } else {
        None
    };

    if args.json {
        let roll = roller
            .as_ref()
            .map(|r| r.tooltip())
            .transpose()
            .map_err(|e| e.to_string())?;
        let report = DamageReport {
            formula,
            bundle: &bundle,
            roll,
        };
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "  {} {}",
        scenario.item.name.bold(),
        format!("({} DC)", bundle.dice_parts.dc()).dimmed()
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Source", "Dice", "Detail"]);
    for tag in &bundle.tags {
        table.add_row(vec![&tag.name, &tag.value, &tag.title]);
    }
    println!("{table}");
    println!("  {} {}", "Damage".bold(), formula.green().bold());

    if let Some(roller) = &roller {
        println!();
        super::print_roll(roller)?;
    }
    Ok(())
}
