use super::*;
use crate::action::{IllegalReason, legal_actions};
use crate::rewards::finalize;
use crate::rng::{MidpointRng, PcgRng};
use crate::state::{Combatant, EffectInstance, SkillPoints};
use crate::testing::{catalog, encounter};

fn act(
    state: &mut CombatState,
    catalog: &Catalog,
    rng: &mut dyn CombatRng,
    now_ms: u64,
    action: CombatAction,
) -> Result<Resolution, ResolveError> {
    let mut ctx = ResolveContext::new(catalog, rng, now_ms);
    CombatEngine::new(state).apply(&mut ctx, &action)
}

fn monster_turn(state: &mut CombatState, catalog: &Catalog, rng: &mut dyn CombatRng) -> Resolution {
    let mut ctx = ResolveContext::new(catalog, rng, 0);
    CombatEngine::new(state)
        .advance_monster_turn(&mut ctx)
        .expect("monster turn resolves")
}

fn ids(state: &CombatState, catalog: &Catalog, now_ms: u64) -> Vec<String> {
    legal_actions(state, catalog, now_ms)
        .into_iter()
        .map(|a| a.id)
        .collect()
}

#[test]
fn begin_logs_weakness_and_seeds_pool() {
    let catalog = catalog();
    let state = encounter(&catalog, "warrior", "goblin_warrior");

    assert_eq!(state.skill_points.current(), 5);
    assert_eq!(state.skill_points.max(), 10);
    assert_eq!(state.turn, TurnOwner::Player);
    assert_eq!(state.outcome, Outcome::Ongoing);
    assert!(state.player.record.in_combat);
    let first = state.log.lines().next().unwrap_or_default();
    assert!(first.contains("Goblin Warrior"));
    assert!(first.contains("physical"));
}

#[test]
fn basic_attack_then_monster_turn() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");

    let res = act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    assert!(res.turn_passed);
    // base 20 + 20/2 = 30, midpoint of [25, 38] = 31
    assert_eq!(state.monster.hp, 89);
    assert_eq!(state.monster.toughness, 50);
    assert_eq!(state.skill_points.current(), 6);
    assert_eq!(state.player.ultimate_energy(), 10);
    assert_eq!(state.turn, TurnOwner::Monster);
    assert!(legal_actions(&state, &catalog, 0).is_empty());
    assert_eq!(
        act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack),
        Err(ResolveError::NotPlayerTurn)
    );

    monster_turn(&mut state, &catalog, &mut rng);
    // midpoint of [20, 35] = 27
    assert_eq!(state.player.hp(), 123);
    assert_eq!(state.skill_points.current(), 8);
    assert_eq!(state.turn, TurnOwner::Player);
    assert_eq!(state.turn_count, 1);
}

#[test]
fn weakness_break_skips_a_turn_and_amplifies_the_next_hit() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.monster.max_hp = 1_000;
    state.monster.hp = 1_000;
    state.player.record.resources.max_hp = 1_000;
    state.player.record.resources.hp = 1_000;

    for hit in 1..=6 {
        let res = act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
        if hit < 6 {
            assert!(!state.monster.broken);
            monster_turn(&mut state, &catalog, &mut rng);
        } else {
            assert!(res.log.iter().any(|line| line.starts_with("BREAK")));
        }
    }
    assert_eq!(state.monster.toughness, 0);
    assert!(state.monster.broken);
    assert_eq!(state.monster.hp, 1_000 - 6 * 31);
    let hp_before_skip = state.player.hp();
    assert_eq!(hp_before_skip, 1_000 - 5 * 27);

    let skip = monster_turn(&mut state, &catalog, &mut rng);
    assert!(skip.log.iter().any(|line| line.contains("loses its turn")));
    assert_eq!(state.player.hp(), hp_before_skip);
    assert!(state.monster.broken);
    assert_eq!(state.monster.broken_turns_remaining, 0);

    let before = state.monster.hp;
    act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    // 31 * 1.3 floored
    assert_eq!(before - state.monster.hp, 40);

    monster_turn(&mut state, &catalog, &mut rng);
    assert!(!state.monster.broken);
    assert_eq!(state.monster.toughness, 60);
    assert_eq!(state.player.hp(), hp_before_skip - 27);
}

#[test]
fn critical_applies_before_the_break_bonus() {
    let catalog = catalog();
    let mut rng = MidpointRng::with_unit(0.0);

    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    let res = act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    // 31 * 1.5 floored
    assert_eq!(state.monster.hp, 120 - 46);
    assert!(res.log.iter().any(|line| line.contains("(CRITICAL).")));

    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.monster.toughness = 0;
    state.monster.broken = true;
    let res = act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    // 31 -> 46 -> 59
    assert_eq!(state.monster.hp, 120 - 59);
    assert!(res.log.iter().any(|line| line.contains("(CRITICAL) (broken)")));
}

#[test]
fn stun_waits_for_the_break_skip_to_pass() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.monster.toughness = 0;
    state.monster.broken = true;
    state.monster.broken_turns_remaining = 1;
    state
        .monster
        .effects
        .insert("stun".into(), EffectInstance::new(1, 0));
    state.turn = TurnOwner::Monster;
    let hp = state.player.hp();

    let skip = monster_turn(&mut state, &catalog, &mut rng);
    assert!(skip.log.iter().any(|line| line.contains("loses its turn")));
    assert_eq!(state.monster.effects["stun"].duration, 1);

    act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    let res = monster_turn(&mut state, &catalog, &mut rng);
    assert!(res.log.iter().any(|line| line.contains("recovers from the break")));
    assert!(res.log.iter().any(|line| line.contains("cannot act")));
    assert!(!state.monster.broken);
    assert!(state.monster.effects.is_empty());
    assert_eq!(state.player.hp(), hp);
}

#[test]
fn ultimate_keeps_the_turn() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "mage", "goblin_warrior");
    state.monster.max_hp = 300;
    state.monster.hp = 300;
    state.player.record.resources.ultimate_energy = 100;

    let res = act(&mut state, &catalog, &mut rng, 0, CombatAction::UseUltimate).unwrap();
    assert!(!res.turn_passed);
    // midpoint of [90, 120]
    assert_eq!(state.monster.hp, 195);
    assert_eq!(state.player.ultimate_energy(), 0);
    assert_eq!(state.turn, TurnOwner::Player);
    // magic does not hit a physical weakness
    assert_eq!(state.monster.toughness, 60);

    act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    assert_eq!(state.monster.hp, 164);
    assert_eq!(state.turn, TurnOwner::Monster);
}

#[test]
fn ultimate_requires_full_energy() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.resources.ultimate_energy = 99;

    assert!(!ids(&state, &catalog, 0).contains(&"use_ultimate".to_owned()));
    assert_eq!(
        act(&mut state, &catalog, &mut rng, 0, CombatAction::UseUltimate),
        Err(ResolveError::IllegalAction(IllegalReason::UltimateNotReady))
    );
}

#[test]
fn skill_gated_by_ammunition() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "archer", "goblin_warrior");
    let shot = CombatAction::UseSkill("explosive_shot".into());

    assert!(!ids(&state, &catalog, 0).contains(&shot.to_string()));
    assert_eq!(
        act(&mut state, &catalog, &mut rng, 0, shot.clone()),
        Err(ResolveError::IllegalAction(IllegalReason::MissingConsumable))
    );

    state.player.record.add_item("explosive_arrow".into(), 1);
    assert!(ids(&state, &catalog, 0).contains(&shot.to_string()));

    let res = act(&mut state, &catalog, &mut rng, 0, shot).unwrap();
    assert!(res.turn_passed);
    assert!(!state.player.record.inventory.contains_key("explosive_arrow"));
    assert_eq!(state.skill_points.current(), 2);
    // base 40 + 10 = 50, midpoint of [45, 58] = 51
    assert_eq!(state.monster.hp, 69);
    assert_eq!(state.monster.toughness, 40);
    assert!(state.monster.effects.contains_key("burn"));
    assert!(res.log.iter().any(|line| line.contains("30% of armor")));
}

#[test]
fn skill_cost_checked_when_listing_and_applying() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.skill_points = SkillPoints::new(1, 10);

    assert!(!ids(&state, &catalog, 0).contains(&"use_skill:power_strike".to_owned()));
    assert_eq!(
        act(
            &mut state,
            &catalog,
            &mut rng,
            0,
            CombatAction::UseSkill("power_strike".into())
        ),
        Err(ResolveError::IllegalAction(IllegalReason::InsufficientSp))
    );
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.add_item("explosive_arrow".into(), 2);
    let before = state.clone();

    let cases = [
        (
            CombatAction::UseSkill("chrono_tap".into()),
            IllegalReason::WrongClass,
        ),
        (
            CombatAction::UseSkill("moonwalk".into()),
            IllegalReason::UnknownSkill,
        ),
        (
            CombatAction::UseConsumable("explosive_arrow".into()),
            IllegalReason::ItemNotConsumable,
        ),
        (
            CombatAction::UseConsumable("miracle_box".into()),
            IllegalReason::UnknownItem,
        ),
        (
            CombatAction::UseConsumable("health_potion".into()),
            IllegalReason::MissingConsumable,
        ),
        (CombatAction::Wait, IllegalReason::WaitNotNeeded),
    ];
    for (action, reason) in cases {
        assert_eq!(
            act(&mut state, &catalog, &mut rng, 0, action),
            Err(ResolveError::IllegalAction(reason))
        );
    }
    assert_eq!(state, before);
}

#[test]
fn stopwatch_stacks_into_a_stun() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "mage", "goblin_warrior");
    let tap = CombatAction::UseSkill("chrono_tap".into());

    act(&mut state, &catalog, &mut rng, 0, tap.clone()).unwrap();
    assert_eq!(state.monster.effects["stopwatch"].stacks, Some(1));
    monster_turn(&mut state, &catalog, &mut rng);
    act(&mut state, &catalog, &mut rng, 0, tap.clone()).unwrap();
    assert_eq!(state.monster.effects["stopwatch"].stacks, Some(2));
    assert_eq!(state.monster.effects["stopwatch"].duration, 3);
    monster_turn(&mut state, &catalog, &mut rng);

    act(&mut state, &catalog, &mut rng, 0, tap).unwrap();
    assert!(!state.monster.effects.contains_key("stopwatch"));
    assert!(state.monster.effects.contains_key("stun"));

    let hp = state.player.hp();
    let res = monster_turn(&mut state, &catalog, &mut rng);
    assert!(res.log.iter().any(|line| line.contains("cannot act")));
    assert_eq!(state.player.hp(), hp);
    assert!(state.monster.effects.is_empty());
}

#[test]
fn stunned_player_may_only_wait_or_flee() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "stone_gaze");

    act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    monster_turn(&mut state, &catalog, &mut rng);

    assert!(state.player.stunned);
    assert!(state.player.effects().is_empty());
    assert_eq!(ids(&state, &catalog, 0), ["flee", "wait"]);
    assert_eq!(
        act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack),
        Err(ResolveError::IllegalAction(IllegalReason::Stunned))
    );

    let res = act(&mut state, &catalog, &mut rng, 0, CombatAction::Wait).unwrap();
    assert!(res.turn_passed);
    assert!(!state.player.stunned);
    assert_eq!(state.turn, TurnOwner::Monster);
}

#[test]
fn consumables_are_free_but_on_cooldown() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.add_item("health_potion".into(), 2);
    state.player.record.resources.hp = 120;
    let potion = CombatAction::UseConsumable("health_potion".into());

    let res = act(&mut state, &catalog, &mut rng, 10_000, potion.clone()).unwrap();
    assert!(!res.turn_passed);
    assert_eq!(state.turn, TurnOwner::Player);
    assert_eq!(state.player.hp(), 150);
    assert_eq!(state.player.record.item_count("health_potion"), 1);

    assert!(!ids(&state, &catalog, 10_500).contains(&potion.to_string()));
    assert_eq!(
        act(&mut state, &catalog, &mut rng, 10_500, potion.clone()),
        Err(ResolveError::IllegalAction(IllegalReason::ConsumableOnCooldown))
    );

    act(&mut state, &catalog, &mut rng, 11_000, potion).unwrap();
    assert!(!state.player.record.inventory.contains_key("health_potion"));
}

#[test]
fn cleansing_removes_only_what_it_targets() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "healer", "goblin_warrior");
    let effects = state.player.effects_mut();
    effects.insert("hex".into(), EffectInstance::new(3, -50));
    effects.insert("burn".into(), EffectInstance::new(2, 10));
    state.player.record.resources.hp = 100;

    act(
        &mut state,
        &catalog,
        &mut rng,
        0,
        CombatAction::UseSkill("purify".into()),
    )
    .unwrap();
    assert_eq!(state.player.hp(), 130);
    assert!(!state.player.effects().contains_key("hex"));
    assert!(state.player.effects().contains_key("burn"));
    assert!(state.player.effects().contains_key("guard"));

    monster_turn(&mut state, &catalog, &mut rng);
    // 27 halved by guard, then burn ticks 10% of 150
    assert_eq!(state.player.hp(), 130 - 13 - 15);

    state.player.record.add_item("cleansing_tea".into(), 1);
    act(
        &mut state,
        &catalog,
        &mut rng,
        0,
        CombatAction::UseConsumable("cleansing_tea".into()),
    )
    .unwrap();
    assert!(!state.player.effects().contains_key("burn"));
    assert!(state.player.effects().contains_key("guard"));
    assert_eq!(state.player.ultimate_energy(), 20);
}

#[test]
fn attack_modifiers_scale_the_roll() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state
        .player
        .effects_mut()
        .insert("hex".into(), EffectInstance::new(3, -50));

    act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    // attack 20 halved to 10: base 25, midpoint of [20, 33] = 26
    assert_eq!(state.monster.hp, 120 - 26);
}

#[test]
fn flee_ends_combat_with_penalty() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.gold = 250;

    let res = act(&mut state, &catalog, &mut rng, 0, CombatAction::Flee).unwrap();
    assert!(!res.turn_passed);
    assert_eq!(state.outcome, Outcome::Fled);
    assert_eq!(state.player.record.gold, 225);
    assert!(legal_actions(&state, &catalog, 0).is_empty());
    assert_eq!(
        act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack),
        Err(ResolveError::CombatOver)
    );
}

#[test]
fn heal_over_time_ticks_on_the_players_turn() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.resources.hp = 100;
    state
        .player
        .effects_mut()
        .insert("regen".into(), EffectInstance::new(2, 10));
    state.turn = TurnOwner::Monster;

    let res = monster_turn(&mut state, &catalog, &mut rng);
    // hit for 27, then 10% of 150 back
    assert_eq!(state.player.hp(), 100 - 27 + 15);
    assert!(res.log.iter().any(|line| line.contains("recovers 15 HP")));
    assert_eq!(state.player.effects()["regen"].duration, 1);

    act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    monster_turn(&mut state, &catalog, &mut rng);
    assert_eq!(state.player.hp(), 88 - 27 + 15);
    assert!(!state.player.effects().contains_key("regen"));
}

#[test]
fn reapplying_an_effect_refreshes_its_duration() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "archer", "goblin_warrior");
    state.player.record.add_item("explosive_arrow".into(), 2);
    let shot = CombatAction::UseSkill("explosive_shot".into());

    act(&mut state, &catalog, &mut rng, 0, shot.clone()).unwrap();
    assert_eq!(state.monster.effects["burn"].duration, 2);
    monster_turn(&mut state, &catalog, &mut rng);
    assert_eq!(state.monster.effects["burn"].duration, 1);

    act(&mut state, &catalog, &mut rng, 0, shot).unwrap();
    assert_eq!(state.monster.effects["burn"].duration, 2);
    assert_eq!(state.monster.effects["burn"].stacks, None);
}

#[test]
fn damage_over_time_can_win_on_the_monster_turn() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.monster.hp = 5;
    state
        .monster
        .effects
        .insert("burn".into(), EffectInstance::new(2, 10));
    state.turn = TurnOwner::Monster;

    let hp = state.player.hp();
    monster_turn(&mut state, &catalog, &mut rng);
    assert_eq!(state.outcome, Outcome::Victory);
    assert_eq!(state.monster.hp, 0);
    assert_eq!(state.player.hp(), hp);

    let settlement = finalize(&state, &mut rng).unwrap();
    let rewards = settlement.rewards.unwrap();
    assert_eq!(rewards.xp, 100);
    assert_eq!(rewards.levels_gained, 1);
    assert_eq!(settlement.record.level, 2);
    assert_eq!(settlement.record.xp, 0);
}

#[test]
fn victory_commit_scales_with_level() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.level = 10;
    state.monster.hp = 1;

    let res = act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    assert!(!res.turn_passed);
    assert_eq!(state.outcome, Outcome::Victory);
    assert_eq!(state.player.ultimate_energy(), 10);

    let settlement = finalize(&state, &mut rng).unwrap();
    let rewards = settlement.rewards.unwrap();
    assert_eq!((rewards.xp, rewards.gold), (190, 95));
    assert_eq!(rewards.drops.get("health_potion"), Some(&1));
    assert_eq!(rewards.levels_gained, 0);

    let record = settlement.record;
    assert_eq!(record.xp, 190);
    assert_eq!(record.gold, 95);
    assert_eq!(record.item_count("health_potion"), 1);
    assert_eq!(record.resources.ultimate_energy, 0);
    assert!(!record.in_combat);
}

#[test]
fn defeat_commit_applies_penalty() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.gold = 1_000;
    state.player.record.resources.max_hp = 400;
    state.player.record.resources.hp = 1;
    state.player.record.resources.ultimate_energy = 70;

    act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
    monster_turn(&mut state, &catalog, &mut rng);
    assert_eq!(state.outcome, Outcome::Defeat);
    assert_eq!(state.player.hp(), 0);

    let record = finalize(&state, &mut rng).unwrap().record;
    assert_eq!(record.gold, 850);
    assert_eq!(record.resources.hp, 100);
    assert_eq!(record.resources.ultimate_energy, 0);
    assert!(!record.in_combat);
}

#[test]
fn force_exit_ignores_turn_and_charges_heavily() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.gold = 200;
    state.player.record.resources.max_hp = 300;
    state.player.record.resources.ultimate_energy = 40;
    state.turn = TurnOwner::Monster;

    CombatEngine::new(&mut state).force_exit().unwrap();
    assert_eq!(state.outcome, Outcome::ForceExited);
    let record = finalize(&state, &mut rng).unwrap().record;
    assert_eq!(record.gold, 140);
    assert_eq!(record.resources.hp, 1);
    assert_eq!(record.resources.ultimate_energy, 0);
    assert_eq!(record.force_exits, 1);
    assert!(!record.in_combat);

    assert_eq!(
        CombatEngine::new(&mut state).force_exit(),
        Err(ResolveError::CombatOver)
    );
}

#[test]
fn abandon_has_no_penalty() {
    let catalog = catalog();
    let mut rng = MidpointRng::new();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.gold = 200;

    CombatEngine::new(&mut state).abandon().unwrap();
    assert_eq!(state.outcome, Outcome::ForceExited);
    let record = finalize(&state, &mut rng).unwrap().record;
    assert_eq!(record.gold, 200);
    assert_eq!(record.force_exits, 0);
}

#[test]
fn legal_actions_are_listed_in_stable_order() {
    let catalog = catalog();
    let mut state = encounter(&catalog, "warrior", "goblin_warrior");
    state.player.record.resources.ultimate_energy = 100;
    state.player.record.add_item("health_potion".into(), 3);
    state.player.record.add_item("akuma_feather".into(), 1);

    let actions = legal_actions(&state, &catalog, 0);
    let listed: Vec<_> = actions.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(
        listed,
        [
            "basic_attack",
            "use_skill:power_strike",
            "use_ultimate",
            "use_consumable:health_potion",
            "flee",
        ]
    );
    assert_eq!(actions[1].sp_cost, Some(2));
    assert_eq!(actions[3].label, "Health Potion (x3)");
}

#[test]
fn seeded_encounters_replay_identically() {
    let catalog = catalog();
    let run = |seed: u64| {
        let mut rng = PcgRng::new(seed);
        let mut state = encounter(&catalog, "warrior", "goblin_warrior");
        for _ in 0..40 {
            if state.is_over() {
                break;
            }
            act(&mut state, &catalog, &mut rng, 0, CombatAction::BasicAttack).unwrap();
            if state.turn == TurnOwner::Monster {
                monster_turn(&mut state, &catalog, &mut rng);
            }
        }
        state
    };

    let first = run(11);
    assert_eq!(first, run(11));
    assert!(first.is_over());
}
