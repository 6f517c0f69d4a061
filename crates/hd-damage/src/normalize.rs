//! One-time normalization of actor data at load time.

use tracing::debug;

use crate::context::ActorContext;

/// Give every conditional attack an explicit flag for each of the actor's
/// attacks, defaulting to enabled. Existing flags are kept.
///
/// Run once after loading an actor; damage calculation never fills these in
/// itself. Returns the number of flags added.
pub fn normalize_conditional_attacks(context: &mut ActorContext) -> usize {
    let mut added = 0;
    for conditional in &mut context.conditional_attacks {
        for attack in &context.attacks {
            if !conditional.targets.contains_key(&attack.id) {
                conditional.targets.insert(attack.id.clone(), true);
                added += 1;
            }
        }
    }
    if added > 0 {
        debug!(actor = %context.name, added, "materialized conditional attack flags");
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConditionalAttack;
    use crate::item::ItemDescriptor;

    fn actor() -> ActorContext {
        let mut actor = ActorContext::new("Assassin", 15.0);
        actor.attacks = vec![
            ItemDescriptor::new("knife", "Knife", "HKA").killing().with_dc(3.0),
            ItemDescriptor::new("punch", "Punch", "HA"),
        ];
        actor.conditional_attacks.push(ConditionalAttack {
            id: "db".to_string(),
            name: "Deadly Blow".to_string(),
            xmlid: "DEADLYBLOW".to_string(),
            levels: 1,
            ..ConditionalAttack::default()
        });
        actor
    }

    #[test]
    fn fills_missing_flags() {
        let mut actor = actor();
        actor.conditional_attacks[0]
            .targets
            .insert("punch".to_string(), false);

        assert_eq!(normalize_conditional_attacks(&mut actor), 1);
        let targets = &actor.conditional_attacks[0].targets;
        assert_eq!(targets.get("knife"), Some(&true));
        assert_eq!(targets.get("punch"), Some(&false));
    }

    #[test]
    fn idempotent() {
        let mut actor = actor();
        assert_eq!(normalize_conditional_attacks(&mut actor), 2);
        let snapshot = actor.clone();
        assert_eq!(normalize_conditional_attacks(&mut actor), 0);
        assert_eq!(actor, snapshot);
    }
}
