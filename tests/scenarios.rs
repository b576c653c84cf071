use glam::Vec2;
use proptest::prelude::*;

use vector_defense::game::{Action, FrameInput};
use vector_defense::leaderboard::Leaderboard;
use vector_defense::persistence::{FileStore, MemoryStore, RecordStore};
use vector_defense::sim::combat::{self, effective_interval};
use vector_defense::sim::{
    Enemy, GameEvent, GameState, NodeVariant, PickupKind, TickInput, Upgrade, economy, tick,
};
use vector_defense::{Game, Rejection, Screen, Tuning};

const DT: f32 = 1.0 / 60.0;

fn quiet_state(seed: u64) -> GameState {
    let mut tuning = Tuning::default();
    tuning.enemies.pickup_chance = 0.0;
    GameState::new(seed, tuning)
}

fn around_core(state: &GameState, angle: f32, radius: f32) -> Vec2 {
    state.tuning.core.position + Vec2::new(angle.cos(), angle.sin()) * radius
}

// --- Wave lifecycle ---

#[test]
fn first_wave_spawns_twelve_then_clears() {
    let mut state = quiet_state(3);
    let node = around_core(&state, 0.0, 150.0);
    let place = TickInput {
        click: Some(node),
        start_wave: true,
        ..Default::default()
    };
    tick(&mut state, &place, DT);
    assert_eq!(state.nodes.len(), 1);
    assert_eq!(state.run.wave, 1);
    assert_eq!(state.run.enemies_to_spawn, 12);
    assert!(!state.run.boss_pending);

    let mut spawned = 0;
    let mut frames = 0;
    while state.run.wave_active && frames < 3000 {
        // Every enemy dies the frame after it appears
        for enemy in &mut state.enemies {
            enemy.apply_damage(f32::MAX);
        }
        tick(&mut state, &TickInput::default(), DT);
        spawned += state
            .events
            .drain(..)
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        frames += 1;
    }

    assert!(!state.run.wave_active);
    assert_eq!(spawned, 12);
    assert!(state.nodes.is_empty());
    assert!(state.enemies.is_empty());
    assert_eq!(state.run.core_health, 20);
}

#[test]
fn wave_clear_happens_on_first_eligible_frame() {
    let mut state = quiet_state(4);
    state.run.wave = 1;
    state.run.wave_active = true;
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(
        id,
        around_core(&state, 1.0, 500.0),
        3,
        22.0,
        0.0,
        3.0,
    ));
    tick(&mut state, &TickInput::default(), DT);
    assert!(state.run.wave_active);

    state.enemies[0].apply_damage(3.0);
    tick(&mut state, &TickInput::default(), DT);
    assert!(!state.run.wave_active);
    assert!(state.events.contains(&GameEvent::WaveCleared { wave: 1 }));
}

// --- Combat ---

#[test]
fn eight_sided_enemy_splits_into_two_shards() {
    let mut state = quiet_state(5);
    let pos = around_core(&state, 2.0, 400.0);
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(id, pos, 8, 22.0, 100.0, 8.0));
    state.enemies[0].apply_damage(8.0);

    combat::resolve_deaths(&mut state);

    assert_eq!(state.enemies.len(), 2);
    for shard in &state.enemies {
        assert_eq!(shard.sides, 3);
        assert_eq!(shard.health, 5.0);
        assert_eq!(shard.pos, pos);
        assert!(shard.alive);
    }
    assert_eq!(state.run.currency, 8 * 14 + 20);
    assert_eq!(state.run.score, 800);
}

#[test]
fn pulse_and_node_kill_rewards_once() {
    let mut state = quiet_state(6);
    state.run.wave = 1;
    state.run.wave_active = true;
    state.run.pulse_charges = 1;
    state.run.enemies_to_spawn = 5;
    let node = around_core(&state, 0.0, 150.0);
    combat::place_node(&mut state, node).unwrap();
    state.nodes[0].cooldown = 10.0;
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(
        id,
        around_core(&state, 0.0, 250.0),
        3,
        22.0,
        0.0,
        3.0,
    ));

    let input = TickInput {
        discharge: true,
        ..Default::default()
    };
    tick(&mut state, &input, DT);
    tick(&mut state, &TickInput::default(), DT);

    let destroyed = state
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    assert_eq!(state.run.currency, 3 * 14 + 20);
}

#[test]
fn overdrive_cryo_uses_overdrive_interval() {
    let mut state = quiet_state(7);
    state.run.cryo_unlocked = true;
    let normal = effective_interval(&state, NodeVariant::Cryo);
    assert!((normal - 0.8 * 1.5).abs() < 1e-6);

    vector_defense::sim::abilities::apply_pickup(&mut state, PickupKind::Overdrive);
    assert_eq!(effective_interval(&state, NodeVariant::Cryo), 0.05);
}

#[test]
fn pulse_charges_drop_by_exactly_one() {
    let mut state = quiet_state(8);
    state.run.pulse_charges = 2;
    assert_eq!(combat::discharge_pulse(&mut state), Err(Rejection::WaveInactive));
    state.run.wave_active = true;
    combat::discharge_pulse(&mut state).unwrap();
    assert_eq!(state.run.pulse_charges, 1);
    combat::discharge_pulse(&mut state).unwrap();
    assert_eq!(state.run.pulse_charges, 0);
    assert_eq!(combat::discharge_pulse(&mut state), Err(Rejection::NoCharges));
}

#[test]
fn emp_freezes_enemies_but_nodes_keep_firing() {
    let mut state = quiet_state(9);
    state.run.wave_active = true;
    state.run.enemies_to_spawn = 10;
    let node_pos = around_core(&state, 0.5, 500.0);
    combat::place_node(&mut state, node_pos).unwrap();
    state.nodes[0].cooldown = 10.0;
    let id = state.next_entity_id();
    let start = around_core(&state, 0.5, 600.0);
    state.enemies.push(Enemy::new(id, start, 3, 22.0, 150.0, 1_000.0));
    vector_defense::sim::abilities::apply_pickup(&mut state, PickupKind::Emp);

    tick(&mut state, &TickInput::default(), DT);
    assert!(state.enemies[0].health < 1_000.0);
    assert_eq!(state.enemies[0].pos, start);

    for _ in 0..60 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert_eq!(state.enemies[0].pos, start);

    for _ in 0..240 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert!(state.events.contains(&GameEvent::EmpExpired));
    assert_ne!(state.enemies[0].pos, start);
}

// --- Economy & screens ---

#[test]
fn fifth_slot_unlocks_cryo_after_leaving_armory() {
    let mut game = Game::new(1, Tuning::default(), Box::new(MemoryStore::new()));
    game.frame(&FrameInput::action(Action::Confirm), DT);
    game.state_mut().run.currency = 5_000;
    game.state_mut().run.max_nodes = 4;

    game.frame(&FrameInput::action(Action::OpenUpgrades), DT);
    assert_eq!(game.screen(), Screen::Upgrade);
    let slot = game.layout().upgrades[0];
    let snap = game.frame(
        &FrameInput::click_at(Vec2::new(slot.x + 10.0, slot.y + 10.0)),
        DT,
    );
    assert_eq!(snap.run.max_nodes, 5);
    assert!(snap.run.cryo_unlocked);
    assert!(snap.notices.is_empty());
    assert!(snap.events.contains(&GameEvent::VariantUnlocked {
        variant: NodeVariant::Cryo
    }));

    let snap = game.frame(&FrameInput::action(Action::Confirm), DT);
    assert_eq!(snap.screen, Screen::Play);
    assert_eq!(snap.notices.len(), 1);
    assert!(snap.notices[0].text.contains("UNLOCKED"));
}

#[test]
fn purchases_subtract_displayed_cost() {
    let mut state = quiet_state(10);
    state.run.currency = 3_000;
    state.run.core_health = 10;
    for upgrade in Upgrade::ALL {
        let shown = economy::cost(&state.run, &state.tuning, upgrade);
        let before = state.run.currency;
        economy::purchase(&mut state, upgrade).unwrap();
        assert_eq!(state.run.currency, before - shown);
    }
}

#[test]
fn full_run_records_score_on_reboot() {
    let mut game = Game::new(2, Tuning::default(), Box::new(MemoryStore::new()));
    game.frame(&FrameInput::action(Action::Confirm), DT);
    game.frame(&FrameInput::action(Action::StartWave), DT);

    // Undefended: keep calling waves until the core breaks
    let mut frames = 0;
    while game.screen() == Screen::Play && frames < 60 * 600 {
        game.frame(&FrameInput::action(Action::StartWave), DT);
        frames += 1;
    }
    assert_eq!(game.screen(), Screen::GameOver);

    game.frame(&FrameInput::typing("ZED"), DT);
    let snap = game.frame(&FrameInput::action(Action::Confirm), DT);
    assert_eq!(snap.screen, Screen::Play);
    assert_eq!(snap.run.wave, 0);
    assert!(!snap.run.wave_active);
    assert_eq!(snap.leaderboard.len(), 1);
    assert_eq!(snap.leaderboard[0].name, "ZED");
}

// --- Leaderboard ---

#[test]
fn file_leaderboard_append_then_load() {
    let path = std::env::temp_dir().join(format!("vd-scenario-{}.txt", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let mut board = Leaderboard::new(Box::new(FileStore::new(&path)));
    board.append_entry("LOW", 100).unwrap();
    board.append_entry("HIGH", 900).unwrap();
    board.append_entry("", 500).unwrap();

    let mut reopened = Leaderboard::new(Box::new(FileStore::new(&path)));
    let entries = reopened.load_entries().to_vec();
    let pairs: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.score)).collect();
    assert_eq!(pairs, [("HIGH", 900), ("OPERATOR", 500), ("LOW", 100)]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn malformed_store_keeps_readable_prefix() {
    let store = MemoryStore::with_contents("ALPHA 10\nBROKEN\nGAMMA 30\n");
    assert!(store.load().is_ok());
    let board = Leaderboard::new(Box::new(store));
    assert_eq!(board.entries().len(), 1);
    assert_eq!(board.entries()[0].name, "ALPHA");
}

// --- Properties ---

proptest! {
    #[test]
    fn leaderboard_stays_sorted(
        scores in proptest::collection::vec((0u64..1_000_000, "[A-Z]{1,8}"), 1..20)
    ) {
        let mut board = Leaderboard::new(Box::new(MemoryStore::new()));
        for (score, name) in &scores {
            board.append_entry(name, *score).unwrap();
        }
        let entries = board.entries();
        prop_assert_eq!(entries.len(), scores.len());
        prop_assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
        for (score, name) in &scores {
            prop_assert!(entries.iter().any(|e| e.score == *score && &e.name == name));
        }
    }

    #[test]
    fn placement_respects_capacity_and_exclusion(
        clicks in proptest::collection::vec((0.0f32..std::f32::consts::TAU, 0.0f32..400.0), 1..30),
        capacity in 1u32..8,
    ) {
        let mut state = quiet_state(11);
        state.run.max_nodes = capacity;
        let exclusion = state.tuning.core.exclusion_radius;
        for (angle, radius) in clicks {
            let pos = around_core(&state, angle, radius);
            let inside = pos.distance(state.tuning.core.position) <= exclusion;
            let result = combat::place_node(&mut state, pos);
            if inside {
                prop_assert!(result.is_err());
            }
            prop_assert!(state.nodes.len() as u32 <= capacity);
        }
    }

    #[test]
    fn currency_and_score_never_drop_during_play(seed in 0u64..500) {
        let mut state = GameState::new(seed, Tuning::default());
        let node = around_core(&state, 0.3, 140.0);
        let opening = TickInput {
            click: Some(node),
            start_wave: true,
            ..Default::default()
        };
        tick(&mut state, &opening, DT);
        let (mut currency, mut score) = (state.run.currency, state.run.score);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), DT);
            prop_assert!(state.run.currency >= currency);
            prop_assert!(state.run.score >= score);
            currency = state.run.currency;
            score = state.run.score;
        }
    }
}
