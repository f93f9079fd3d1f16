//! Command line interface

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use kdam::{tqdm, BarExt};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use qmin::generators::random;
use qmin::io::{read_problem_file, write_problem_file};
use qmin::report::{Solutions, Trace};
use qmin::verify::{check_truth_table, MAX_TRUTH_TABLE_VARIABLES};
use qmin::{minimize, CostModel, MinimizeOptions, Problem, Result};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Setup logging on the terminal
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        // Only fails if a logger is already installed
        let _ = TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );
    }
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Minimize a Boolean function
    ///
    /// The function is given by its minterms and don't-cares, either on the command line
    /// or in a file:
    ///    minterms: 0 2 3 5
    ///    dontcares: 7
    #[clap(alias = "min")]
    Minimize(MinimizeArgs),

    /// Minimize random functions and check the results
    ///
    /// Each function is minimized, then its solutions are checked against the truth table.
    #[clap()]
    Random(RandomArgs),

    /// Generate a random function and write it to a file
    #[clap(alias = "gen")]
    Generate(GenerateArgs),
}

/// Command arguments for minimization
#[derive(Args)]
pub struct MinimizeArgs {
    /// Required minterms
    #[arg(short = 'm', long, num_args = 1.., value_delimiter = ',', allow_negative_numbers = true, required_unless_present = "file")]
    minterms: Vec<i64>,

    /// Don't-care minterms
    #[arg(short = 'd', long, num_args = 1.., value_delimiter = ',', allow_negative_numbers = true)]
    dont_cares: Vec<i64>,

    /// File describing the function
    #[arg(short = 'f', long, conflicts_with_all = ["minterms", "dont_cares"])]
    file: Option<PathBuf>,

    /// Number of variables, if more than required by the largest minterm
    #[arg(long)]
    vars: Option<usize>,

    /// Show all intermediate tables
    #[arg(long)]
    trace: bool,

    /// Among solutions with the fewest terms, keep only those with the fewest literals
    #[arg(long)]
    literals: bool,

    /// Check the solutions against the complete truth table
    #[arg(long)]
    check: bool,
}

impl MinimizeArgs {
    fn problem(&self) -> Result<Problem> {
        let problem = match &self.file {
            Some(path) => read_problem_file(path)?,
            None => Problem::from_signed(&self.minterms, &self.dont_cares)?,
        };
        match self.vars {
            Some(w) => problem.with_width(w),
            None => Ok(problem),
        }
    }

    pub fn run(&self) -> Result<()> {
        let problem = self.problem()?;
        let options = MinimizeOptions::default().with_cost(cost_model(self.literals));
        let res = minimize(&problem, &options)?;
        if self.trace {
            println!("{}", Trace(&res));
        } else {
            print!("{}", Solutions(&res));
        }
        if self.check {
            for s in res.solutions() {
                check_truth_table(s, &problem)?;
            }
            println!("All solutions match the truth table");
        }
        Ok(())
    }
}

/// Command arguments for random testing
#[derive(Args)]
pub struct RandomArgs {
    /// Number of variables
    #[arg(long, default_value_t = 4)]
    vars: usize,

    /// Number of functions to minimize
    #[arg(short = 'n', long, default_value_t = 100)]
    count: usize,

    /// Random seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Probability for a minterm to be required
    #[arg(long, default_value_t = 0.5)]
    density: f64,

    /// Probability for a minterm to be a don't-care
    #[arg(long, default_value_t = 0.0)]
    dc_density: f64,

    /// Among solutions with the fewest terms, keep only those with the fewest literals
    #[arg(long)]
    literals: bool,
}

impl RandomArgs {
    pub fn run(&self) -> Result<()> {
        let options = MinimizeOptions::default().with_cost(cost_model(self.literals));
        let check = self.vars <= MAX_TRUTH_TABLE_VARIABLES;
        let mut progress = tqdm!(total = self.count);
        progress.set_description("Functions minimized");
        let mut nb_petrick = 0;
        let mut nb_solutions = 0;
        let mut nb_terms = 0;
        for i in 0..self.count {
            let problem = random::function(
                self.vars,
                self.density,
                self.dc_density,
                self.seed.wrapping_add(i as u64),
            )?;
            let res = minimize(&problem, &options)?;
            if check {
                for s in res.solutions() {
                    check_truth_table(s, &problem)?;
                }
            }
            if res.used_petrick() {
                nb_petrick += 1;
            }
            nb_solutions += res.solutions().len();
            nb_terms += res.solutions()[0].nb_terms();
            progress.set_postfix(format!("petrick={}", nb_petrick));
            progress.update(1)?;
        }
        progress.write(format!(
            "Minimized {} functions on {} variables: {} needed Petrick's method, {:.2} solutions and {:.2} terms on average",
            self.count,
            self.vars,
            nb_petrick,
            nb_solutions as f64 / self.count.max(1) as f64,
            nb_terms as f64 / self.count.max(1) as f64,
        ))?;
        Ok(())
    }
}

/// Command arguments for function generation
#[derive(Args)]
pub struct GenerateArgs {
    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Number of variables
    #[arg(long, default_value_t = 4)]
    vars: usize,

    /// Random seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Probability for a minterm to be required
    #[arg(long, default_value_t = 0.5)]
    density: f64,

    /// Probability for a minterm to be a don't-care
    #[arg(long, default_value_t = 0.0)]
    dc_density: f64,
}

impl GenerateArgs {
    pub fn run(&self) -> Result<()> {
        let problem = random::function(self.vars, self.density, self.dc_density, self.seed)?;
        write_problem_file(&self.output, &problem)
    }
}

fn cost_model(literals: bool) -> CostModel {
    if literals {
        CostModel::TermsThenLiterals
    } else {
        CostModel::Terms
    }
}
