use hd_dice::{HeroRoller, dc_to_dice_parts};

use crate::RollKind;

pub struct RollArgs {
    pub dc: f64,
    pub tier: Option<u32>,
    pub kind: RollKind,
    pub seed: Option<u64>,
    pub standard_effect: bool,
    pub hit_location: bool,
    pub json: bool,
}

pub async fn run(args: &RollArgs) -> Result<(), String> {
    super::check_dc(args.dc)?;
    let killing = args.kind == RollKind::Killing;
    let tier = super::resolve_tier(args.tier, killing)?;
    let parts = dc_to_dice_parts(tier, args.dc);

    let mut roller = HeroRoller::new()
        .make_normal_roll(args.kind == RollKind::Normal)
        .make_killing_roll(killing, false)
        .make_success_roll(args.kind == RollKind::Success)
        .make_adjustment_roll(args.kind == RollKind::Adjustment)
        .make_entangle_roll(args.kind == RollKind::Entangle)
        .make_flash_roll(args.kind == RollKind::Flash)
        .modify_to_standard_effect(args.standard_effect)
        .add_to_hit_location(args.hit_location, None)
        .add_dice_parts(&parts);

    let mut source = super::die_source(args.seed);
    roller
        .roll(&mut source)
        .await
        .map_err(|e| e.to_string())?;

    if args.json {
        let tooltip = roller.tooltip().map_err(|e| e.to_string())?;
        let json = serde_json::to_string_pretty(&tooltip).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }
    super::print_roll(&roller)
}
