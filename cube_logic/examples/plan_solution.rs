use cube_logic::{DeviceProfile, MoveTranslator, parse_solution};
use std::env;

// Usage: cargo run --example plan_solution -- "R1 U2 F2 U3 B3" [laptop]
fn main() {
    let args: Vec<String> = env::args().collect();
    let solution = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("R1 U2 F2 U3 B3 U3 F3 L1 B1 U1 D1 R2 L3 D2 B2 R1 D2 L3 D2 L3");
    let profile = match args.get(2).map(String::as_str) {
        Some("laptop") => DeviceProfile::laptop(),
        _ => DeviceProfile::robot(),
    };

    let moves = match parse_solution(solution) {
        Ok(moves) => moves,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut translator = MoveTranslator::new(profile.start);
    let mut total = 0;
    println!("start {}", translator.orientation());
    for (i, mv) in moves.iter().enumerate() {
        let robot = translator.translate(*mv);
        total += robot.actions();
        println!(
            "{:>2} {:<3} {:<9} now {}",
            i + 1,
            mv.to_string(),
            robot.to_string(),
            translator.orientation()
        );
    }
    println!("{} moves, {} robot actions", moves.len(), total);
}
