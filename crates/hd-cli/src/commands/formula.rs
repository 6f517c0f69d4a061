use hd_dice::{
    DiceParts, add_dice_parts, dc_to_dice_parts, dice_parts_to_fully_qualified_effect_formula,
};

pub fn run(dc: f64, tier: Option<u32>, killing: bool, die_minus_one: bool) -> Result<(), String> {
    super::check_dc(dc)?;
    let tier = super::resolve_tier(tier, killing)?;

    let mut parts = dc_to_dice_parts(tier, dc);
    if die_minus_one {
        parts = add_dice_parts(tier, &parts, &DiceParts::ZERO, true);
    }

    println!("{}", dice_parts_to_fully_qualified_effect_formula(&parts, killing));
    Ok(())
}
