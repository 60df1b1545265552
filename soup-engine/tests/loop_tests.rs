use soup_engine::{
    Command, DropletId, LoopState, Recorder, SimConfig, SimObserver, SimulationLoop, Viewport,
};

#[derive(Default)]
struct Tally {
    seeds: Vec<usize>,
    merges: usize,
    stirs: usize,
    transitions: Vec<(LoopState, LoopState)>,
}

impl SimObserver for Tally {
    fn on_seed(&mut self, count: usize) {
        self.seeds.push(count);
    }

    fn on_merge(&mut self, _consumed: (DropletId, DropletId), _created: DropletId) {
        self.merges += 1;
    }

    fn on_stir(&mut self, _gathered: usize) {
        self.stirs += 1;
    }

    fn on_state_change(&mut self, from: LoopState, to: LoopState) {
        self.transitions.push((from, to));
    }
}

fn settled(seed: u64) -> SimulationLoop<Tally> {
    let mut sim = SimulationLoop::with_observer(SimConfig::default(), seed, Tally::default());
    sim.start(Viewport::new(900.0, 600.0));
    let mut rec = Recorder::new();
    for _ in 0..60 {
        sim.frame(&mut rec).unwrap();
    }
    sim
}

/// A click that will merge: the centre of a droplet whose nearest candidate
/// neighbour touches it closely enough.
fn mergeable_click(sim: &SimulationLoop<Tally>) -> (f32, f32) {
    let droplets = sim.store().as_slice();
    let config = sim.config();
    for a in droplets {
        let neighbour = droplets
            .iter()
            .filter(|b| b.id() != a.id())
            .map(|b| (b, ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()))
            .filter(|(b, dist)| *dist < b.radius + config.merge_tolerance)
            .min_by(|x, y| x.1.total_cmp(&y.1));
        if let Some((b, dist)) = neighbour {
            if dist > 0.0 && dist < (a.radius + b.radius) * config.merge_distance_factor * 0.95 {
                return (a.x, a.y);
            }
        }
    }
    panic!("no mergeable pair in a settled scene");
}

#[test]
fn lifecycle_runs_idle_to_running_to_idle() {
    let mut sim = SimulationLoop::with_observer(SimConfig::default(), 1, Tally::default());
    assert_eq!(sim.state(), LoopState::Idle);
    assert!(sim.tick().is_none(), "idle loops do not tick");

    sim.start(Viewport::new(900.0, 600.0));
    assert_eq!(sim.state(), LoopState::Running);
    assert_eq!(sim.store().len(), 60);
    assert!(sim.tick().is_some());

    sim.stop();
    assert_eq!(sim.state(), LoopState::Idle);
    assert!(sim.store().is_empty());
    assert!(sim.tick().is_none());

    assert_eq!(
        sim.observer().transitions,
        vec![(LoopState::Idle, LoopState::Running), (LoopState::Running, LoopState::Idle)]
    );
    assert_eq!(sim.observer().seeds, vec![60]);
}

#[test]
fn input_is_dropped_while_idle() {
    let mut sim = SimulationLoop::new(SimConfig::default(), 2);
    sim.push(Command::Stir);
    sim.push(Command::Click { x: 10.0, y: 10.0 });
    assert_eq!(sim.pending(), 0);

    sim.start(Viewport::new(300.0, 300.0));
    sim.push(Command::PointerMove { x: 10.0, y: 10.0 });
    assert_eq!(sim.pending(), 1);
    sim.stop();
    assert_eq!(sim.pending(), 0, "stop discards queued input");
}

#[test]
fn frame_draws_every_visible_droplet() {
    let mut sim = SimulationLoop::new(SimConfig::default(), 3);
    sim.start(Viewport::new(900.0, 600.0));
    let mut rec = Recorder::new();

    let report = sim.frame(&mut rec).unwrap();

    assert!(report.is_some());
    assert_eq!(rec.bodies(), 60);
    assert_eq!(sim.frames(), 1);
}

#[test]
fn stopped_frame_draws_nothing() {
    let mut sim = SimulationLoop::new(SimConfig::default(), 3);
    let mut rec = Recorder::new();
    assert!(sim.frame(&mut rec).unwrap().is_none());
    assert!(rec.ops.is_empty());
}

#[test]
fn clicks_merge_only_while_playing() {
    let mut sim = settled(21);
    let (x, y) = mergeable_click(&sim);
    let before = sim.store().len();

    sim.push(Command::Click { x, y });
    sim.tick();
    assert_eq!(sim.store().len(), before, "menu clicks are ignored");

    let (x, y) = mergeable_click(&sim);
    sim.set_playing(true);
    sim.push(Command::Click { x, y });
    sim.tick();
    assert_eq!(sim.store().len(), before - 1);
    assert_eq!(sim.observer().merges, 1);
}

#[test]
fn stir_hides_hint_at_once() {
    let mut sim = SimulationLoop::with_observer(SimConfig::default(), 4, Tally::default());
    // Exactly one droplet: nothing to merge, so the hint shows.
    sim.start(Viewport::new(100.0, 90.0));
    sim.set_playing(true);
    sim.tick();
    assert!(sim.hint_visible());

    sim.push(Command::Stir);
    assert!(!sim.hint_visible(), "hidden before the next tick");

    sim.tick();
    assert_eq!(sim.observer().seeds, vec![1, 1], "a lone droplet reseeds");
    assert!(sim.hint_visible(), "re-evaluated on the tick");
}

#[test]
fn stir_gathers_many() {
    let mut sim = settled(5);
    let count = sim.store().len();
    sim.push(Command::Stir);
    sim.tick();
    assert_eq!(sim.observer().stirs, 1);
    assert_eq!(sim.store().len(), count);
}

#[test]
fn resize_reseeds_only_empty_store() {
    let mut sim = SimulationLoop::with_observer(SimConfig::default(), 6, Tally::default());
    sim.start(Viewport::new(0.0, 0.0));
    assert!(sim.store().is_empty());

    sim.resize(Viewport::new(900.0, 600.0));
    assert_eq!(sim.store().len(), 60);

    sim.resize(Viewport::new(450.0, 300.0));
    assert_eq!(sim.store().len(), 60, "populated stores keep their droplets");
    assert_eq!(sim.store().viewport(), Viewport::new(450.0, 300.0));
    assert_eq!(sim.observer().seeds, vec![0, 60]);

    let mut rec = Recorder::new();
    for _ in 0..30 {
        sim.frame(&mut rec).unwrap();
    }
    sim.tick();
    for d in sim.store().iter() {
        assert!(d.x >= d.radius && d.x <= 450.0 - d.radius);
        assert!(d.y >= d.radius && d.y <= 300.0 - d.radius);
    }
}

#[test]
fn restart_builds_a_fresh_store() {
    let mut sim = settled(7);
    sim.set_playing(true);
    let (x, y) = mergeable_click(&sim);
    sim.push(Command::Click { x, y });
    sim.tick();
    assert_eq!(sim.store().len(), 59);

    sim.stop();
    sim.start(Viewport::new(900.0, 600.0));

    assert_eq!(sim.store().len(), 60);
    assert_eq!(sim.frames(), 0);
    assert!(sim.store().iter().all(|d| d.radius == 0.0), "everything grows in again");
}

#[test]
fn pointer_is_ignored_outside_play() {
    let config = SimConfig::default();
    let mut quiet = SimulationLoop::new(config.clone(), 8);
    let mut poked = SimulationLoop::new(config, 8);
    quiet.start(Viewport::new(900.0, 600.0));
    poked.start(Viewport::new(900.0, 600.0));

    let mut rec = Recorder::new();
    for i in 0..50 {
        poked.push(Command::PointerMove { x: 9.0 * i as f32, y: 300.0 });
        quiet.frame(&mut rec).unwrap();
        poked.frame(&mut rec).unwrap();
    }

    for (a, b) in quiet.store().iter().zip(poked.store().iter()) {
        assert_eq!((a.x, a.y), (b.x, b.y));
    }
}

#[test]
fn same_seed_same_soup() {
    let run = || {
        let mut sim = SimulationLoop::new(SimConfig::default(), 99);
        sim.start(Viewport::new(640.0, 480.0));
        sim.set_playing(true);
        let mut rec = Recorder::new();
        for i in 0..120 {
            if i % 10 == 0 {
                sim.push(Command::PointerMove { x: 5.0 * i as f32, y: 240.0 });
            }
            if i == 60 {
                sim.push(Command::Stir);
            }
            sim.frame(&mut rec).unwrap();
        }
        sim.store().iter().map(|d| (d.id(), d.x, d.y, d.radius)).collect::<Vec<_>>()
    };

    let first = run();
    for _ in 0..3 {
        assert_eq!(first, run());
    }
}
