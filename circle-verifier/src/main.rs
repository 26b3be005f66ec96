use anyhow::{anyhow, Result};
use circle_challenges::smallest_circle::{Bounds, Challenge, Solution, Track};
use circle_utils::{dejsonify, jsonify, u8s_from_str};
use clap::{arg, Command};
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;
use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

fn cli() -> Command {
    Command::new("circle-verifier")
        .about("Inspects smallest enclosing circle instances and scores candidate centers")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("info")
                .about("Prints the number of points and the bounding box of an instance")
                .arg(
                    arg!(<INSTANCE> "Path to an instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("evaluate_solution")
                .about("Prints the enclosing radius of a candidate center")
                .arg(
                    arg!(<INSTANCE> "Path to an instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--max_radius [MAX_RADIUS] "If set, fails when the radius is greater")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("random_solution")
                .about("Samples candidate centers uniformly from the bounding box")
                .arg(
                    arg!(<INSTANCE> "Path to an instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<RAND_HASH> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--count [COUNT] "Number of candidates to print")
                        .default_value("1")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("generate_instance")
                .about("Generates a random instance")
                .arg(
                    arg!(<RAND_HASH> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--n_points <N_POINTS> "Number of points")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--width [WIDTH] "Points are sampled from [0, WIDTH] on x")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--height [HEIGHT] "Points are sampled from [0, HEIGHT] on y")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the instance is saved to this file path instead of printed")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("info", sub_m)) => info(sub_m.get_one::<PathBuf>("INSTANCE").unwrap()),
        Some(("evaluate_solution", sub_m)) => evaluate_solution(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap(),
            sub_m.get_one::<String>("SOLUTION").unwrap(),
            sub_m.get_one::<f64>("max_radius").copied(),
        ),
        Some(("random_solution", sub_m)) => random_solution(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap(),
            sub_m.get_one::<String>("RAND_HASH").unwrap(),
            *sub_m.get_one::<usize>("count").unwrap(),
        ),
        Some(("generate_instance", sub_m)) => generate_instance(
            sub_m.get_one::<String>("RAND_HASH").unwrap(),
            Track {
                n_points: *sub_m.get_one::<usize>("n_points").unwrap(),
                width: *sub_m.get_one::<f64>("width").unwrap(),
                height: *sub_m.get_one::<f64>("height").unwrap(),
            },
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct InstanceInfo<'a> {
    nb_points: usize,
    bounds: &'a Bounds,
}

pub fn info(instance: &Path) -> Result<()> {
    let challenge = Challenge::from_file(instance)?;
    println!(
        "{}",
        jsonify(&InstanceInfo {
            nb_points: challenge.nb_points,
            bounds: &challenge.bounds,
        })?
    );
    Ok(())
}

pub fn evaluate_solution(
    instance: &Path,
    solution: &str,
    max_radius: Option<f64>,
) -> Result<()> {
    let challenge = Challenge::from_file(instance)?;
    let candidate = load_solution(solution)?;
    let radius = challenge.evaluate_solution(&candidate)?;
    println!("{}", radius);
    if let Some(max_radius) = max_radius {
        challenge.verify_solution(&Solution::try_from(candidate)?, max_radius)?;
        println!("Solution is valid");
    }
    Ok(())
}

pub fn random_solution(instance: &Path, rand_hash: &str, count: usize) -> Result<()> {
    let challenge = Challenge::from_file(instance)?;
    let mut rng = SmallRng::from_seed(u8s_from_str(rand_hash));
    for _ in 0..count {
        println!("{}", jsonify(&challenge.random_solution(&mut rng))?);
    }
    Ok(())
}

pub fn generate_instance(rand_hash: &str, track: Track, output: Option<PathBuf>) -> Result<()> {
    let challenge = Challenge::generate_instance(&u8s_from_str(rand_hash), &track)?;
    match output {
        Some(path) => challenge.save(path)?,
        None => print!("{}", challenge.to_instance_string()),
    }
    Ok(())
}

fn load_solution(solution: &str) -> Result<Vec<f64>> {
    let solution = if solution == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read solution from stdin: {}", e))?;
        buffer
    } else if solution.ends_with(".json") {
        fs::read_to_string(solution)
            .map_err(|e| anyhow!("Failed to read solution file {}: {}", solution, e))?
    } else {
        solution.to_string()
    };

    dejsonify::<Vec<f64>>(&solution).map_err(|e| anyhow!("Failed to parse solution: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_parse_generate_instance_args() {
        let matches = cli()
            .try_get_matches_from([
                "circle-verifier",
                "generate_instance",
                "abc",
                "--n_points",
                "12",
                "--width",
                "5.5",
            ])
            .unwrap();
        let (name, sub_m) = matches.subcommand().unwrap();
        assert_eq!(name, "generate_instance");
        assert_eq!(*sub_m.get_one::<usize>("n_points").unwrap(), 12);
        assert_eq!(*sub_m.get_one::<f64>("width").unwrap(), 5.5);
        assert_eq!(*sub_m.get_one::<f64>("height").unwrap(), 1000.0);
    }

    #[test]
    fn test_load_inline_solution() {
        assert_eq!(load_solution("[1, 2.5]").unwrap(), vec![1.0, 2.5]);
        assert!(load_solution("not json").is_err());
        assert!(load_solution("missing.json").is_err());
    }

    #[test]
    fn test_subcommands_on_bundled_instance() {
        let square = Path::new("instances/square.txt");
        assert!(info(square).is_ok());
        assert!(random_solution(square, "seed", 3).is_ok());
        assert!(evaluate_solution(square, "[1, 1]", Some(1.5)).is_ok());
        assert!(evaluate_solution(square, "[0, 0]", Some(1.5)).is_err());
        assert!(evaluate_solution(square, "[1]", None).is_err());
        assert!(info(Path::new("instances/missing.txt")).is_err());
    }
}
