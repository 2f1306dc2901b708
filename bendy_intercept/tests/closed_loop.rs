use std::time::Duration;

use bendy_intercept::config::{FormationConfig, InterceptConfig};
use bendy_intercept::formations::intercept::{InterceptFormation, Phase};
use bendy_intercept::*;

const TICK: Duration = Duration::from_millis(20);

fn scenario(kind: FormationKind) -> ScenarioConfig {
    ScenarioConfig {
        formation: FormationConfig {
            kind,
            ..FormationConfig::default()
        },
        obstacles: vec![
            Obstacle::new(Point::new(30.0, 22.0), 2.0).unwrap(),
            Obstacle::new(Point::new(45.0, 15.0), 3.0).unwrap(),
        ],
        ..ScenarioConfig::default()
    }
}

fn trajectory(kind: FormationKind, ticks: usize) -> Vec<(Point, Vec<Point>)> {
    let mut simulation = Simulation::from_config(&scenario(kind)).unwrap();
    (0..ticks)
        .map(|_| {
            simulation.step(TICK).unwrap();
            let defenders = simulation
                .formation()
                .defenders()
                .iter()
                .map(|d| d.position)
                .collect();
            (simulation.leader().position, defenders)
        })
        .collect()
}

#[test]
fn test_runs_are_reproducible() {
    for kind in [
        FormationKind::None,
        FormationKind::CArc,
        FormationKind::RoleSwap,
        FormationKind::Intercept,
    ] {
        let first = trajectory(kind, 600);
        let second = trajectory(kind, 600);
        assert_eq!(first, second, "{kind} diverged");
    }
}

#[test]
fn test_defenders_respect_speed_limits() {
    for kind in [FormationKind::CArc, FormationKind::RoleSwap, FormationKind::Intercept] {
        let mut simulation = Simulation::from_config(&scenario(kind)).unwrap();
        for _ in 0..600 {
            simulation.step(TICK).unwrap();
            for defender in simulation.formation().defenders() {
                assert!(defender.velocity.norm() <= defender.limits.max_speed + 1e-9);
            }
            let leader = simulation.leader();
            assert!(leader.velocity.norm() <= leader.limits.max_speed + 1e-9);
        }
    }
}

#[test]
fn test_intercept_phase_invariants() {
    let config = InterceptConfig::default();
    let target = Point::new(40.0, 5.0);
    let start = Point::new(10.0, 20.0);
    let destination = Point::new(60.0, 20.0);

    let mut formation = InterceptFormation::new(config.clone(), start).unwrap();
    formation.set_target(target);
    let mut planner = BendyRuler::new(PlannerConfig::default()).unwrap();
    let mut leader = Vehicle::new(start, VehicleLimits::default());
    let dt = TICK.as_secs_f64();
    let mut saw_recon = false;

    for _ in 0..1500 {
        let before = formation.recon_attempts();
        let obstacles = formation.update(dt, &leader);

        match formation.phase() {
            Phase::Recon => {
                saw_recon = true;
                assert!(obstacles.is_empty());
            }
            Phase::Pursuit => {
                assert_eq!(obstacles.len(), config.defender_count());
                assert!(formation.assigned_slots().is_empty());
            }
            Phase::Trap => {
                assert!(formation.is_success());
                assert!((leader.position - target).norm() <= config.exit_distance);
                let mut slots = formation.assigned_slots().to_vec();
                slots.sort_unstable();
                let expected: Vec<usize> = (0..config.defender_count()).collect();
                assert_eq!(slots, expected);
                assert_eq!(obstacles.len(), config.defender_count());
            }
        }
        assert!(formation.recon_attempts() >= before);
        assert!(formation.recon_attempts() <= config.max_recon_attempts);
        assert!(formation.observed_rays().len() as u32 <= formation.recon_attempts());

        let waypoint = if obstacles.is_empty() {
            destination
        } else {
            planner.update(leader.position, destination, leader.velocity, &obstacles)
        };
        leader.steer(dt, destination, waypoint, None);
    }
    assert!(saw_recon);
}

#[test]
fn test_yaml_scenario_runs() {
    let yaml = "
leader:
  start: [0, 0]
  destination: [40, 0]
planner:
  lookahead: 12.0
formation:
  kind: c_arc
  target: [20, -10]
obstacles:
  - [20, 0, 2.5]
";
    let config = ScenarioConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.formation.kind, FormationKind::CArc);
    let mut simulation = Simulation::from_config(&config).unwrap();
    for _ in 0..200 {
        simulation.step(TICK).unwrap();
    }
    assert_eq!(simulation.formation().defenders().len(), 4);
    assert_eq!(simulation.sim_time(), Duration::from_secs(4));
    assert!(simulation.leader().position.x > 0.0);
}

#[test]
fn test_bundled_scenario_loads() {
    let config = ScenarioConfig::from_yaml(include_str!("../../scenarios/intercept.yaml")).unwrap();
    assert_eq!(config.formation.kind, FormationKind::Intercept);
    assert_eq!(config.obstacles.len(), 2);
    assert_eq!(config, scenario(FormationKind::Intercept));
}
