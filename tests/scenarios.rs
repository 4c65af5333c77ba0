//! Seeded end-to-end scenarios run as black-box tests against the public
//! `build_generator`/`solve` surface.

use haulsched::entities::{DrivingTimeTable, Terminal, TransportRequest, Truck};
use haulsched::generator::build_generator;
use haulsched::ids::{CargoId, RequestId, TerminalId, TruckId};
use haulsched::schedule::mutation::{apply_add_transition, apply_remove_transitions};
use haulsched::time::{Duration, Instant};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn hours(h: i64) -> Instant {
    Instant::new(h * 3600)
}

fn terminal_ab() -> (TerminalId, TerminalId) {
    (TerminalId::new(0), TerminalId::new(1))
}

/// Scenario S1: single truck, single feasible request.
#[test]
fn s1_single_truck_single_feasible_request() {
    init_tracing();
    let (a, b) = terminal_ab();
    let terminals = vec![
        Terminal::new(a, hours(7), hours(17)),
        Terminal::new(b, hours(8), hours(18)),
    ];
    let trucks = vec![Truck::new(TruckId::new(0), a, 1000.0, false)];
    let mut driving_times = DrivingTimeTable::new();
    driving_times.insert(a, b, Duration::new(3600));
    let request = TransportRequest {
        id: RequestId::new(0),
        cargo: CargoId::new(0),
        from_terminal: a,
        to_terminal: b,
        pickup_open: hours(6),
        pickup_close: hours(8),
        dropoff_open: hours(8),
        dropoff_close: hours(11),
        driving_time: Duration::new(3600),
        weight: 1.0,
        adr_required: false,
    };
    let generator = build_generator(
        &terminals,
        &trucks,
        &[request],
        (hours(0), hours(24)),
        driving_times,
    );
    let schedule = generator.empty_schedule(&[request]);

    assert_eq!(schedule.candidate_count(), 2);
    let truck_id = TruckId::new(0);
    let state = &schedule.trucks[&truck_id];
    let starts: Vec<Instant> = state
        .candidates
        .iter()
        .map(|c| match c {
            haulsched::Mutation::AddTransition { start, .. } => *start,
            _ => unreachable!(),
        })
        .collect();
    assert!(starts.contains(&hours(7)));
    assert!(starts.iter().any(|s| *s >= hours(7) && *s < hours(8)));

    let mut state = state.clone();
    let mut unplanned = schedule.unplanned.clone();
    apply_add_transition(
        &mut state,
        &mut unplanned,
        generator.context(),
        truck_id,
        a,
        b,
        hours(7),
        hours(8),
        CargoId::new(0),
        RequestId::new(0),
    )
    .unwrap();

    assert!(unplanned.is_empty());
    assert_eq!(state.transitions.len(), 1);
    assert_eq!(
        generator.context().driving_times.get(a, b),
        Duration::new(3600)
    );
}

/// Scenario S2: a narrower, later pickup window still yields a legal
/// delivery, with the earliest candidate anchored to the pickup open time.
#[test]
fn s2_window_forces_late_pickup() {
    let (a, b) = terminal_ab();
    let terminals = vec![
        Terminal::new(a, hours(7), hours(17)),
        Terminal::new(b, hours(8), hours(18)),
    ];
    let trucks = vec![Truck::new(TruckId::new(0), a, 1000.0, false)];
    let mut driving_times = DrivingTimeTable::new();
    driving_times.insert(a, b, Duration::new(3600));
    let request = TransportRequest {
        id: RequestId::new(0),
        cargo: CargoId::new(0),
        from_terminal: a,
        to_terminal: b,
        pickup_open: hours(10),
        pickup_close: hours(14),
        dropoff_open: hours(11),
        dropoff_close: hours(15),
        driving_time: Duration::new(3600),
        weight: 1.0,
        adr_required: false,
    };
    let generator = build_generator(
        &terminals,
        &trucks,
        &[request],
        (hours(0), hours(24)),
        driving_times,
    );
    let schedule = generator.empty_schedule(&[request]);
    let state = &schedule.trucks[&TruckId::new(0)];
    let starts: Vec<Instant> = state
        .candidates
        .iter()
        .map(|c| match c {
            haulsched::Mutation::AddTransition { start, .. } => *start,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(starts.len(), 2);
    assert_eq!(*starts.iter().min().unwrap(), hours(10));
    // The latest legal start is within the same hour the narrative calls
    // "13:00" — one second short of the 14:00 deadline under half-open
    // interval semantics.
    let latest = *starts.iter().max().unwrap();
    assert!(latest >= hours(13) && latest < hours(14));
}

/// Scenario S3: incompatible driving time yields no feasible delivery at all.
#[test]
fn s3_incompatible_driving_time_yields_empty_solution() {
    let (a, b) = terminal_ab();
    let terminals = vec![
        Terminal::new(a, hours(7), hours(17)),
        Terminal::new(b, hours(8), hours(18)),
    ];
    let trucks = vec![Truck::new(TruckId::new(0), a, 1000.0, false)];
    let mut driving_times = DrivingTimeTable::new();
    driving_times.insert(a, b, Duration::new(3 * 3600));
    let request = TransportRequest {
        id: RequestId::new(0),
        cargo: CargoId::new(0),
        from_terminal: a,
        to_terminal: b,
        pickup_open: hours(6),
        pickup_close: hours(8),
        dropoff_open: hours(8),
        dropoff_close: hours(9),
        driving_time: Duration::new(3 * 3600),
        weight: 1.0,
        adr_required: false,
    };
    let mut generator = build_generator(
        &terminals,
        &trucks,
        &[request],
        (hours(0), hours(24)),
        driving_times,
    );
    let schedule = generator.empty_schedule(&[request]);
    assert_eq!(schedule.candidate_count(), 0);

    let unchanged = generator.neighbour(&schedule, 10);
    assert_eq!(generator.score(&unchanged), generator.score(&schedule));

    let (best, score) = haulsched::solve(schedule, &mut generator, 10.0, 1e-3, 50, 5, 0.0, 1);
    assert_eq!(score.deliveries, 0);
    assert_eq!(best.unplanned.len(), 1);
}

/// Scenario S4: two cargos competing for one truck's single feasible slot;
/// committing to one drops the other's now-infeasible candidate.
#[test]
fn s4_two_cargos_one_truck_conflict() {
    let a = TerminalId::new(0);
    let b = TerminalId::new(1);
    let c = TerminalId::new(2);
    let terminals = vec![
        Terminal::new(a, hours(7), hours(17)),
        Terminal::new(b, hours(8), hours(18)),
        Terminal::new(c, hours(7), hours(17)),
    ];
    let trucks = vec![Truck::new(TruckId::new(0), a, 1000.0, false)];
    let mut driving_times = DrivingTimeTable::new();
    driving_times.insert(a, b, Duration::new(3600));
    driving_times.insert(a, c, Duration::new(3600));
    driving_times.insert(b, c, Duration::new(3600));
    let r0 = TransportRequest {
        id: RequestId::new(0),
        cargo: CargoId::new(0),
        from_terminal: a,
        to_terminal: b,
        pickup_open: hours(6),
        pickup_close: hours(8),
        dropoff_open: hours(8),
        dropoff_close: hours(11),
        driving_time: Duration::new(3600),
        weight: 1.0,
        adr_required: false,
    };
    let r1 = TransportRequest {
        id: RequestId::new(1),
        cargo: CargoId::new(1),
        from_terminal: a,
        to_terminal: c,
        pickup_open: hours(6),
        pickup_close: hours(8),
        dropoff_open: hours(8),
        dropoff_close: hours(11),
        driving_time: Duration::new(3600),
        weight: 1.0,
        adr_required: false,
    };
    let requests = vec![r0, r1];
    let mut generator = build_generator(
        &terminals,
        &trucks,
        &requests,
        (hours(0), hours(24)),
        driving_times,
    );
    let schedule = generator.empty_schedule(&requests);
    assert_eq!(schedule.candidate_count(), 4);

    let truck_id = TruckId::new(0);
    let mut state = schedule.trucks[&truck_id].clone();
    let mut unplanned = schedule.unplanned.clone();
    apply_add_transition(
        &mut state,
        &mut unplanned,
        generator.context(),
        truck_id,
        a,
        b,
        hours(7),
        hours(8),
        CargoId::new(0),
        RequestId::new(0),
    )
    .unwrap();

    let still_has_cargo1_candidate = state.candidates.iter().any(|cand| {
        matches!(cand, haulsched::Mutation::AddTransition { cargo, .. } if *cargo == CargoId::new(1))
    });
    assert!(!still_has_cargo1_candidate);

    let (_, score) = haulsched::solve(schedule, &mut generator, 10.0, 1e-3, 20, 5, 0.0, 11);
    assert!(score.deliveries >= 1);
}

/// Scenario S5: removing exactly what was added restores the schedule to
/// the same score vector and unplanned set as the freshly-built empty
/// schedule.
#[test]
fn s5_remove_then_add_is_idempotent() {
    let (a, b) = terminal_ab();
    let terminals = vec![
        Terminal::new(a, hours(7), hours(17)),
        Terminal::new(b, hours(8), hours(18)),
    ];
    let trucks = vec![Truck::new(TruckId::new(0), a, 1000.0, false)];
    let mut driving_times = DrivingTimeTable::new();
    driving_times.insert(a, b, Duration::new(3600));
    let request = TransportRequest {
        id: RequestId::new(0),
        cargo: CargoId::new(0),
        from_terminal: a,
        to_terminal: b,
        pickup_open: hours(6),
        pickup_close: hours(8),
        dropoff_open: hours(8),
        dropoff_close: hours(9),
        driving_time: Duration::new(3600),
        weight: 1.0,
        adr_required: false,
    };
    let generator = build_generator(
        &terminals,
        &trucks,
        &[request],
        (hours(0), hours(24)),
        driving_times,
    );
    let baseline = generator.empty_schedule(&[request]);
    let truck_id = TruckId::new(0);

    let mut state = baseline.trucks[&truck_id].clone();
    let mut unplanned = baseline.unplanned.clone();
    apply_add_transition(
        &mut state,
        &mut unplanned,
        generator.context(),
        truck_id,
        a,
        b,
        hours(7),
        hours(8),
        CargoId::new(0),
        RequestId::new(0),
    )
    .unwrap();
    apply_remove_transitions(
        &mut state,
        &mut unplanned,
        generator.context(),
        truck_id,
        a,
        hours(7),
        hours(8),
    );

    assert_eq!(unplanned, baseline.unplanned);
    assert_eq!(state.transitions, baseline.trucks[&truck_id].transitions);
    assert_eq!(state.unoccupied, baseline.trucks[&truck_id].unoccupied);
}

/// Scenario S6: identical inputs and seed yield an identical best score.
#[test]
fn s6_deterministic_sa_given_a_seed() {
    let (a, b) = terminal_ab();
    let build = || {
        let terminals = vec![
            Terminal::new(a, hours(7), hours(17)),
            Terminal::new(b, hours(8), hours(18)),
        ];
        let trucks = vec![Truck::new(TruckId::new(0), a, 1000.0, false)];
        let mut driving_times = DrivingTimeTable::new();
        driving_times.insert(a, b, Duration::new(3600));
        let request = TransportRequest {
            id: RequestId::new(0),
            cargo: CargoId::new(0),
            from_terminal: a,
            to_terminal: b,
            pickup_open: hours(6),
            pickup_close: hours(8),
            dropoff_open: hours(8),
            dropoff_close: hours(9),
            driving_time: Duration::new(3600),
            weight: 1.0,
            adr_required: false,
        };
        let generator = build_generator(
            &terminals,
            &trucks,
            &[request],
            (hours(0), hours(24)),
            driving_times,
        );
        (generator, request)
    };

    let (mut g1, r1) = build();
    let (mut g2, r2) = build();
    g1.seed(99);
    g2.seed(99);
    let i1 = g1.empty_schedule(&[r1]);
    let i2 = g2.empty_schedule(&[r2]);
    let (_, s1) = haulsched::solve(i1, &mut g1, 10.0, 1e-3, 300, 8, 0.01, 99);
    let (_, s2) = haulsched::solve(i2, &mut g2, 10.0, 1e-3, 300, 8, 0.01, 99);
    assert_eq!(s1, s2);
}
