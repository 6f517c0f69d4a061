pub mod damage;
pub mod formula;
pub mod roll;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use hd_dice::{AttackCostTier, HeroRoller, MAX_DC, RngSource, RollType, TooltipTerm};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Resolve `--tier`, defaulting by damage type.
fn resolve_tier(tier: Option<u32>, killing: bool) -> Result<AttackCostTier, String> {
    match tier {
        Some(ap) => AttackCostTier::from_ap_per_die(ap).ok_or_else(|| {
            format!("unsupported attack cost of {ap} AP per die (expected 3, 5, 6, 10 or 15)")
        }),
        None => Ok(AttackCostTier::for_effect(killing, false)),
    }
}

/// Reject DCs the converter cannot turn into a sane number of dice.
fn check_dc(dc: f64) -> Result<(), String> {
    if !dc.is_finite() {
        return Err(format!("DC must be a finite number, got {dc}"));
    }
    if dc.abs() > MAX_DC {
        return Err(format!("DC {dc} is out of range (at most {MAX_DC} either way)"));
    }
    Ok(())
}

/// A seeded source when a seed is given, otherwise one seeded from the
/// thread RNG.
fn die_source(seed: Option<u64>) -> RngSource<StdRng> {
    match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource(StdRng::from_rng(&mut rand::rng())),
    }
}

fn dice_cell(term: &TooltipTerm) -> String {
    term.dice
        .iter()
        .map(|d| {
            let face = d.raw.to_string();
            if d.is_max {
                face.green().to_string()
            } else if d.is_min {
                face.red().to_string()
            } else {
                face
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print a rolled roller: per-term table, then the totals for its type.
fn print_roll(roller: &HeroRoller) -> Result<(), String> {
    let tooltip = roller.tooltip().map_err(|e| e.to_string())?;

    let (base_header, calc_header) = match tooltip.roll_type {
        RollType::Normal => ("STUN", Some("BODY")),
        RollType::Killing => ("BODY", Some("STUN")),
        _ => ("Total", None),
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Term", "Dice", base_header];
    header.extend(calc_header);
    table.set_header(header);

    for term in &tooltip.terms {
        let name = match &term.label {
            Some(label) => format!("{} ({label})", term.formula),
            None => term.formula.clone(),
        };
        let mut row = vec![name, dice_cell(term), term.base_total.to_string()];
        if calc_header.is_some() {
            row.push(
                term.calculated_total
                    .map_or_else(|| "—".to_string(), |v| v.to_string()),
            );
        }
        table.add_row(row);
    }

    println!(
        "  {} {} {}",
        tooltip.roll_type.to_string().bold(),
        tooltip.formula,
        if roller.is_standard_effect() {
            "(standard effect)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    println!("{table}");

    let err = |e: hd_dice::DiceError| e.to_string();
    match tooltip.roll_type {
        RollType::Normal => println!(
            "  {} {}   {} {}",
            "STUN".bold(),
            roller.stun_total().map_err(err)?,
            "BODY".bold(),
            roller.body_total().map_err(err)?
        ),
        RollType::Killing => println!(
            "  {} {}   {} {}   {}",
            "BODY".bold(),
            roller.body_total().map_err(err)?,
            "STUN".bold(),
            roller.stun_total().map_err(err)?,
            format!("(x{})", roller.stun_multiplier().map_err(err)?).dimmed()
        ),
        RollType::Success => println!("  {} {}", "Total".bold(), roller.success_total().map_err(err)?),
        RollType::Adjustment => println!(
            "  {} {}",
            "Active Points".bold(),
            roller.adjustment_total().map_err(err)?
        ),
        RollType::Entangle => println!("  {} {}", "BODY".bold(), roller.entangle_total().map_err(err)?),
        RollType::Flash => println!("  {} {}", "Segments".bold(), roller.flash_total().map_err(err)?),
    }

    if let Some(location) = &tooltip.hit_location {
        println!(
            "  {} {} {}",
            "Hit location".bold(),
            location.full_name,
            format!(
                "(STUNx{}, BODYx{})",
                location.stun_multiplier, location.body_multiplier
            )
            .dimmed()
        );
    }
    Ok(())
}
