use cube_logic::moves::{FLIP_SEQUENCES, flips_to_bottom, spin_to_front};
use cube_logic::{
    Face, MoveTranslator, Orientation, RobotMove, SolverMove, SolverReply, parse_solution,
    plan_reply, plan_solution,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn robot_moves(s: &str) -> Vec<RobotMove> {
    s.split_whitespace().map(|m| m.parse().unwrap()).collect()
}

fn all_orientations() -> Vec<Orientation> {
    Face::URFDLB
        .into_iter()
        .flat_map(|down| Face::URFDLB.into_iter().filter_map(move |front| Orientation::new(down, front)))
        .collect()
}

// Independent model of the cube in space: U=+y, R=+x, F=+z.
fn axis(face: Face) -> [i32; 3] {
    match face {
        Face::U => [0, 1, 0],
        Face::D => [0, -1, 0],
        Face::R => [1, 0, 0],
        Face::L => [-1, 0, 0],
        Face::F => [0, 0, 1],
        Face::B => [0, 0, -1],
    }
}

fn face_at(v: [i32; 3]) -> Face {
    Face::URFDLB.into_iter().find(|f| axis(*f) == v).unwrap()
}

fn cross(a: [i32; 3], b: [i32; 3]) -> [i32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Applies spin and flips of a robot move to (down, front), the way the hardware moves the cube.
fn apply(down: Face, front: Face, mv: &RobotMove) -> (Face, Face) {
    let (mut d, mut f) = (axis(down), axis(front));
    for _ in 0..mv.spin.rem_euclid(4) {
        f = cross(d, f);
    }
    for _ in 0..mv.flips {
        let old_d = d;
        d = f;
        f = old_d.map(|x| -x);
    }
    (face_at(d), face_at(f))
}

#[test]
fn test_orientations_are_perpendicular_pairs() {
    assert_eq!(all_orientations().len(), 24);
    assert!(Orientation::new(Face::U, Face::D).is_none());
    assert!(Orientation::new(Face::F, Face::F).is_none());
    assert_eq!(Orientation::AFTER_ROBOT_SCAN.to_string(), "RB");
    assert_eq!(Orientation::HOME.down(), Face::D);
    assert_eq!(Orientation::HOME.front(), Face::F);
}

#[test]
fn test_spin_table_matches_geometry() {
    for o in all_orientations() {
        for target in Face::URFDLB {
            let spin = spin_to_front(o, target);
            assert!((-1..=2).contains(&spin));
            let mv = RobotMove::new(spin, 0, 0);
            let (down, front) = apply(o.down(), o.front(), &mv);
            assert_eq!(down, o.down());
            // Spinning only moves faces around the vertical axis.
            if target != o.down() && target != o.down().opposite() {
                assert_eq!(front, target, "{o} -> {target}");
            } else {
                assert_eq!(spin, 0, "{o} -> {target}");
            }
        }
    }
}

#[test]
fn test_each_orientation_lies_on_one_flip_sequence() {
    for o in all_orientations() {
        let on = FLIP_SEQUENCES
            .iter()
            .filter(|seq| {
                (0..4).any(|i| seq[i] == o.down() && seq[(i + 1) % 4] == o.front())
            })
            .count();
        assert_eq!(on, 1, "{o}");
    }
}

#[test]
fn test_flips_bring_target_down() {
    for o in all_orientations() {
        for target in Face::URFDLB {
            let (flips, front) = flips_to_bottom(o, target);
            let expected = if target == o.down() {
                0
            } else if target == o.down().opposite() {
                2
            } else {
                1
            };
            assert_eq!(flips, expected, "{o} -> {target}");
            assert!(Orientation::new(target, front).is_some());
        }
    }
}

#[test]
fn test_translate_reference_solution() {
    let plan = plan_solution(
        "R1 U2 F2 U3 B3 U3 F3 L1 B1 U1 D1 R2 L3 D2 B2 R1 D2 L3 D2 L3",
        Orientation::AFTER_ROBOT_SCAN,
    )
    .unwrap();
    assert_eq!(
        plan.moves,
        robot_moves(
            "S0F0R1 S1F1R2 S1F1R2 S2F1R-1 S0F1R-1 S2F1R-1 S0F1R-1 S-1F1R1 S0F1R1 S-1F1R1 \
             S0F2R1 S1F1R2 S0F2R-1 S0F1R2 S-1F1R2 S1F1R1 S1F1R2 S0F1R-1 S2F1R2 S2F1R-1"
        )
    );
    assert_eq!(plan.total_actions, 53);

    let mut translator = MoveTranslator::new(Orientation::AFTER_ROBOT_SCAN);
    for mv in parse_solution("R1 U2 F2 U3 B3 U3 F3 L1 B1 U1 D1 R2 L3 D2 B2 R1 D2 L3 D2 L3").unwrap() {
        translator.translate(mv);
    }
    assert_eq!(translator.orientation(), Orientation::new(Face::L, Face::U).unwrap());
}

#[test]
fn test_translate_second_solution() {
    let plan = plan_solution(
        "B2 R2 L1 U2 R3 B1 U3 R2 L3 U1 B1 D1 F2 L2 D3 L2 U1 F2 R2 L2",
        Orientation::AFTER_ROBOT_SCAN,
    )
    .unwrap();
    assert_eq!(
        plan.moves,
        robot_moves(
            "S0F1R2 S2F1R2 S0F2R1 S-1F1R2 S0F1R-1 S1F1R1 S1F1R-1 S1F1R2 S0F2R-1 S0F1R1 \
             S1F1R1 S0F1R1 S0F1R2 S1F1R2 S1F1R-1 S2F1R2 S0F1R1 S-1F1R2 S1F1R2 S0F2R2"
        )
    );
    assert_eq!(plan.total_actions, 54);
    assert_eq!(plan.remaining_actions(0), 54);
    assert_eq!(plan.remaining_actions(19), 3);
    assert_eq!(plan.remaining_actions(20), 0);

    let (mut down, mut front) = (Face::R, Face::B);
    for mv in &plan.moves {
        (down, front) = apply(down, front, mv);
    }
    assert_eq!((down, front), (Face::L, Face::F));
}

#[test]
fn test_translate_short_solutions() {
    let start = Orientation::AFTER_ROBOT_SCAN;

    let plan = plan_solution("U2 D2 R2 L2 F2 B2", start).unwrap();
    assert_eq!(
        plan.moves,
        robot_moves("S1F1R2 S0F2R2 S0F1R2 S0F2R2 S1F1R2 S0F2R2")
    );
    assert_eq!(plan.total_actions, 17);

    let plan = plan_solution("U1", start).unwrap();
    assert_eq!(plan.moves, robot_moves("S1F1R1"));
    assert_eq!(plan.total_actions, 3);

    // R is already down: only the bottom layer turns.
    let plan = plan_solution("R1", start).unwrap();
    assert_eq!(plan.moves, robot_moves("S0F0R1"));
    assert_eq!(plan.total_actions, 1);

    let plan = plan_solution("", start).unwrap();
    assert!(plan.is_empty());
    assert_eq!(plan.total_actions, 0);
}

#[test]
fn test_random_solutions_follow_geometry() {
    let mut rng = StdRng::seed_from_u64(7);
    for start in all_orientations() {
        let moves: Vec<SolverMove> = (0..30)
            .map(|_| SolverMove {
                face: Face::URFDLB[rng.gen_range(0..6)],
                turns: rng.gen_range(1..=3),
            })
            .collect();

        let mut translator = MoveTranslator::new(start);
        let (mut down, mut front) = (start.down(), start.front());
        for mv in &moves {
            let robot = translator.translate(*mv);
            (down, front) = apply(down, front, &robot);
            assert_eq!(down, mv.face, "{start}: {mv} gave {robot}");
            assert_eq!(robot.rotate, mv.rotation());
            assert!(robot.flips <= 2);
            assert_eq!(translator.orientation().down(), down);
            assert_eq!(translator.orientation().front(), front);
        }
    }
}

#[test]
fn test_parse_solver_moves() {
    let moves = parse_solution("R1 U2  F3\tB'").unwrap();
    assert_eq!(moves.len(), 4);
    assert_eq!(moves[0].face, Face::R);
    assert_eq!(moves[1].rotation(), 2);
    assert_eq!(moves[2].rotation(), -1);
    assert_eq!(moves[3].rotation(), -1);
    assert_eq!(moves[0].to_string(), "R1");

    assert!(parse_solution("X1").is_err());
    assert!(parse_solution("R4").is_err());
}

#[test]
fn test_robot_move_notation() {
    let mv: RobotMove = "S-1F1R2".parse().unwrap();
    assert_eq!(mv, RobotMove::new(-1, 1, 2));
    assert_eq!(mv.to_string(), "S-1F1R2");
    assert_eq!(mv.actions(), 3);
    assert_eq!(RobotMove::new(0, 2, 0).actions(), 2);

    assert!("F1R2".parse::<RobotMove>().is_err());
    assert!("S1F1".parse::<RobotMove>().is_err());
    assert!("SxF1R2".parse::<RobotMove>().is_err());
}

#[test]
fn test_plan_reply() {
    let start = Orientation::AFTER_ROBOT_SCAN;
    let reply = SolverReply::parse("R1 U2 (2f)");
    assert_eq!(plan_reply(&reply, start).moves, robot_moves("S0F0R1 S1F1R2"));

    let reply = SolverReply::parse("Error: Some facelets are undefined");
    assert!(reply.is_error());
    let plan = plan_reply(&reply, start);
    assert!(plan.is_empty());
    assert_eq!(plan.total_actions, 0);
}
